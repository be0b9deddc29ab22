//! Board module - the settled-cell grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the palette
//! id of the piece that left it there. It owns only settled cells; the
//! active piece is merged in exclusively at lock time.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Board width as an index bound
pub const GRID_WIDTH: usize = BOARD_WIDTH as usize;

/// Board height as an index bound
pub const GRID_HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = GRID_WIDTH * GRID_HEIGHT;

/// Row indices removed by one clear, top to bottom (pre-clear numbering)
pub type ClearedRows = ArrayVec<usize, GRID_HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * GRID_WIDTH + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Placement legality for a shape anchored at (x, y)
    ///
    /// Every occupied cell must satisfy `0 <= x < WIDTH` and `y < HEIGHT`.
    /// Cells above the grid (`y < 0`) skip the occupancy check so pieces can
    /// spawn and rotate partially out of view.
    pub fn can_place(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.cells().all(|(dx, dy)| {
            let bx = x + dx;
            let by = y + dy;
            if bx < 0 || bx >= BOARD_WIDTH as i8 || by >= BOARD_HEIGHT as i8 {
                return false;
            }
            by < 0 || !self.is_occupied(bx, by)
        })
    }

    /// Write a shape's cells into the board
    ///
    /// Cells outside the visible grid are dropped. Returns the number of
    /// cells written.
    pub fn merge(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> usize {
        let mut written = 0;
        for (dx, dy) in shape.cells() {
            if self.set(x + dx, y + dy, Some(kind)) {
                written += 1;
            }
        }
        written
    }

    fn is_row_full(&self, y: usize) -> bool {
        if y >= GRID_HEIGHT {
            return false;
        }
        let start = y * GRID_WIDTH;
        self.cells[start..start + GRID_WIDTH]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove every full row and pad with empty rows at the top
    ///
    /// Retained rows keep their relative order. Returns the removed row
    /// indices, top to bottom. Uses a two-pointer pass with zero allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = GRID_HEIGHT;

        // Scan from bottom to top
        for read_y in (0..GRID_HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * GRID_WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + GRID_WIDTH, write_y * GRID_WIDTH);
                }
            }
        }

        for cell in &mut self.cells[..write_y * GRID_WIDTH] {
            *cell = None;
        }

        cleared_rows.reverse();
        cleared_rows
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(GRID_WIDTH)
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), GRID_HEIGHT);
        assert!(cells_2d.iter().all(|row| row.len() == GRID_WIDTH));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * GRID_WIDTH + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row(kind: PieceKind) -> Vec<Cell> {
        vec![Some(kind); GRID_WIDTH]
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_can_place_exempts_cells_above_grid() {
        let mut board = Board::new();
        let i = Shape::for_kind(PieceKind::I);

        // I occupies matrix row 1, so y = -1 puts it on board row 0.
        assert!(board.can_place(&i, 3, -1));
        // y = -2 puts it entirely above the grid: still legal.
        assert!(board.can_place(&i, 3, -2));
        // Horizontal bounds apply even above the grid.
        assert!(!board.can_place(&i, 7, -2));
        assert!(!board.can_place(&i, -1, -2));

        board.set(4, 0, Some(PieceKind::T));
        assert!(!board.can_place(&i, 3, -1));
        assert!(board.can_place(&i, 3, -2));
    }

    #[test]
    fn test_can_place_rejects_floor() {
        let board = Board::new();
        let o = Shape::for_kind(PieceKind::O);
        assert!(board.can_place(&o, 0, 18));
        assert!(!board.can_place(&o, 0, 19));
    }

    #[test]
    fn test_merge_drops_cells_above_grid() {
        let mut board = Board::new();
        let o = Shape::for_kind(PieceKind::O);
        assert_eq!(board.merge(&o, 4, -1, PieceKind::O), 2);
        assert_eq!(board.get(4, 0), Some(Some(PieceKind::O)));
        assert_eq!(board.get(5, 0), Some(Some(PieceKind::O)));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_clear_preserves_retained_order() {
        let mut rows = vec![vec![None; GRID_WIDTH]; GRID_HEIGHT];
        rows[15][0] = Some(PieceKind::J);
        rows[16] = full_row(PieceKind::I);
        rows[17][1] = Some(PieceKind::L);
        rows[18] = full_row(PieceKind::I);
        rows[19][2] = Some(PieceKind::S);
        let mut board = Board::from_cells(rows);

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[16, 18]);

        let after = board.to_cells();
        assert_eq!(after.len(), GRID_HEIGHT);
        assert!(after[..17].iter().all(|row| row.iter().all(|c| c.is_none())));
        assert_eq!(after[17][0], Some(PieceKind::J));
        assert_eq!(after[18][1], Some(PieceKind::L));
        assert_eq!(after[19][2], Some(PieceKind::S));
    }

    #[test]
    fn test_clear_without_full_rows_is_noop() {
        let mut board = Board::new();
        board.set(0, 19, Some(PieceKind::Z));
        let before = board.clone();
        assert!(board.clear_full_rows().is_empty());
        assert_eq!(board, before);
    }
}
