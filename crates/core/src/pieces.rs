//! Pieces module - Tetromino shape matrices and wall-kick rotation
//!
//! Shapes are small square matrices rotated at runtime; only the wall-kick
//! offsets are tabulated per rotation transition.
//! Reference: https://tetris.wiki/SRS

use crate::types::{PieceKind, Rotation};

/// Largest shape matrix side (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy matrix of a piece in one orientation
///
/// Only the top-left `size × size` corner of `grid` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    grid: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Spawn-orientation shape for a piece kind
    pub fn for_kind(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self {
                size: 4,
                grid: [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
            },
            PieceKind::O => Self {
                size: 2,
                grid: [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]],
            },
            PieceKind::T => Self {
                size: 3,
                grid: [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]],
            },
            PieceKind::S => Self {
                size: 3,
                grid: [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]],
            },
            PieceKind::Z => Self {
                size: 3,
                grid: [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]],
            },
            PieceKind::J => Self {
                size: 3,
                grid: [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]],
            },
            PieceKind::L => Self {
                size: 3,
                grid: [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]],
            },
        }
    }

    /// Side length of the matrix (also its width for centering)
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the matrix cell at (col, row) is occupied
    pub fn is_filled(&self, col: u8, row: u8) -> bool {
        col < self.size && row < self.size && self.grid[row as usize][col as usize] != 0
    }

    /// Occupied cells as (dx, dy) offsets from the matrix's top-left corner
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size)
                .filter(move |&col| self.is_filled(col, row))
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// The matrix rotated 90° clockwise
    ///
    /// `rotated[i][j] = matrix[n - 1 - j][i]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.size;
        let mut grid = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for i in 0..n {
            for j in 0..n {
                if self.is_filled(i, n - 1 - j) {
                    grid[i as usize][j as usize] = 1;
                }
            }
        }
        Self { size: n, grid }
    }

    /// Rows of the matrix as 0/1 values, for next-piece previews
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.grid[..self.size as usize]
            .iter()
            .map(|row| row[..self.size as usize].to_vec())
            .collect()
    }
}

/// Kick candidates for one rotation transition, in trial order
pub type KickRow = [(i8, i8); 5];

/// Kick rows for the 8 transitions, in [`TRANSITIONS`] order
pub type KickTable = [KickRow; 8];

/// Rotation transitions (from, to) by index `0..3`, keyed like `0>1`
pub const TRANSITIONS: [(u8, u8); 8] = [
    (0, 1),
    (1, 0),
    (1, 2),
    (2, 1),
    (2, 3),
    (3, 2),
    (3, 0),
    (0, 3),
];

/// Kicks shared by J, L, S, T, Z (and consulted trivially by O)
///
/// Offsets are (dx, dy) with y pointing up.
pub const NORMAL_KICKS: KickTable = [
    // 0>1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1>0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1>2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2>1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2>3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3>2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3>0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0>3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// Wider kicks for the I piece
pub const I_KICKS: KickTable = [
    // 0>1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1>0
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1>2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2>1
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2>3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3>2
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3>0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0>3
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Only tried when a transition has no table row (e.g. a 180° turn)
const NO_KICK: [(i8, i8); 1] = [(0, 0)];

/// Get kick table for a piece kind
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &NORMAL_KICKS,
    }
}

/// Index of a transition in [`TRANSITIONS`], if it is a quarter turn
pub fn get_kick_index(from: Rotation, to: Rotation) -> Option<usize> {
    let key = (from.index(), to.index());
    TRANSITIONS.iter().position(|&t| t == key)
}

/// Ordered kick candidates for a piece kind and transition
pub fn kicks(kind: PieceKind, from: Rotation, to: Rotation) -> &'static [(i8, i8)] {
    match get_kick_index(from, to) {
        Some(index) => &get_kick_table(kind)[index],
        None => &NO_KICK,
    }
}

/// A rotation that found a legal placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    pub shape: Shape,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// The kick that succeeded, in table (y-up) convention
    pub kick: (i8, i8),
}

/// Try to rotate a piece clockwise with wall kicks
///
/// Each kick `(dx, dy)` is tried in order at anchor `(x + dx, y - dy)`;
/// board rows grow downward while the tables use y-up. Returns `None` when
/// no candidate is legal.
pub fn try_rotate(
    kind: PieceKind,
    shape: &Shape,
    rotation: Rotation,
    x: i8,
    y: i8,
    is_legal: impl Fn(&Shape, i8, i8) -> bool,
) -> Option<Rotated> {
    let new_shape = shape.rotated_cw();
    let new_rotation = rotation.rotate_cw();

    for &(dx, dy) in kicks(kind, rotation, new_rotation) {
        let new_x = x + dx;
        let new_y = y - dy;
        if is_legal(&new_shape, new_x, new_y) {
            return Some(Rotated {
                shape: new_shape,
                rotation: new_rotation,
                x: new_x,
                y: new_y,
                kick: (dx, dy),
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(shape: &Shape) -> Vec<(i8, i8)> {
        shape.cells().collect()
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            let mut shape = Shape::for_kind(kind);
            for _ in 0..4 {
                assert_eq!(shape.cells().count(), 4, "{:?}", kind);
                shape = shape.rotated_cw();
            }
        }
    }

    #[test]
    fn test_t_rotates_clockwise() {
        let t = Shape::for_kind(PieceKind::T);
        assert_eq!(cells(&t), vec![(1, 0), (0, 1), (1, 1), (2, 1)]);

        // Pointing right: stem on the right side of the middle column
        let east = t.rotated_cw();
        assert_eq!(cells(&east), vec![(1, 0), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn test_i_rotates_into_column_two() {
        let east = Shape::for_kind(PieceKind::I).rotated_cw();
        assert_eq!(cells(&east), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let shape = Shape::for_kind(kind);
            let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(shape, back);
        }
    }

    #[test]
    fn test_o_is_rotation_invariant() {
        let o = Shape::for_kind(PieceKind::O);
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn test_kick_index_covers_all_quarter_turns() {
        for (i, &(from, to)) in TRANSITIONS.iter().enumerate() {
            assert_eq!(
                get_kick_index(Rotation::from_index(from), Rotation::from_index(to)),
                Some(i)
            );
        }
        assert_eq!(get_kick_index(Rotation::North, Rotation::South), None);
        assert_eq!(kicks(PieceKind::T, Rotation::North, Rotation::South), &[(0, 0)]);
    }

    #[test]
    fn test_kick_inverts_y() {
        // Block the unkicked spot; the second normal kick for 0>1 is (-1, 0),
        // the third (-1, 1) must land one row higher on the board.
        let rotated = try_rotate(
            PieceKind::T,
            &Shape::for_kind(PieceKind::T),
            Rotation::North,
            4,
            5,
            |_, x, y| x == 3 && y == 4,
        )
        .unwrap();
        assert_eq!(rotated.kick, (-1, 1));
        assert_eq!((rotated.x, rotated.y), (3, 4));
        assert_eq!(rotated.rotation, Rotation::East);
    }

    #[test]
    fn test_rotate_rejected_when_no_kick_fits() {
        let result = try_rotate(
            PieceKind::I,
            &Shape::for_kind(PieceKind::I),
            Rotation::North,
            3,
            0,
            |_, _, _| false,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_shape_rows_preview() {
        let rows = Shape::for_kind(PieceKind::O).rows();
        assert_eq!(rows, vec![vec![1, 1], vec![1, 1]]);
    }
}
