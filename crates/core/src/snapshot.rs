//! Snapshot module - the read model handed to presentation layers
//!
//! A snapshot pairs the rendered grid (settled cells, ghost and active piece)
//! with the counters, lifecycle flags and the event batch of the latest
//! command. It serializes to the JSON the host prints.

use serde::{Serialize, Serializer};

use crate::board::{GRID_HEIGHT, GRID_WIDTH};
use crate::pieces::Shape;
use crate::types::{GameEvent, GameStatus, PieceKind};

/// Prefix marking ghost cells in rendered color tokens
pub const GHOST_PREFIX: &str = "ghost:";

/// One cell of the rendered grid
///
/// Serializes as `null`, the piece color (`"#a000f0"`), or the ghost
/// variant of it (`"ghost:#a000f0"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderCell {
    #[default]
    Empty,
    Filled(PieceKind),
    Ghost(PieceKind),
}

impl RenderCell {
    pub fn is_empty(&self) -> bool {
        matches!(self, RenderCell::Empty)
    }

    /// Color token of this cell, if any
    pub fn token(&self) -> Option<String> {
        match self {
            RenderCell::Empty => None,
            RenderCell::Filled(kind) => Some(kind.color().to_string()),
            RenderCell::Ghost(kind) => Some(format!("{}{}", GHOST_PREFIX, kind.color())),
        }
    }
}

impl Serialize for RenderCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.token() {
            Some(token) => serializer.serialize_some(&token),
            None => serializer.serialize_none(),
        }
    }
}

/// Settled board with ghost and active piece painted on, row 0 at the top
pub type RenderGrid = [[RenderCell; GRID_WIDTH]; GRID_HEIGHT];

/// Look-ahead piece as shown in the preview box
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextPiece {
    pub kind: PieceKind,
    pub color: &'static str,
    pub shape: Vec<Vec<u8>>,
}

impl From<PieceKind> for NextPiece {
    fn from(kind: PieceKind) -> Self {
        Self {
            kind,
            color: kind.color(),
            shape: Shape::for_kind(kind).rows(),
        }
    }
}

/// Everything the presentation layer reads after a tick or command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board: RenderGrid,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub next_piece: Option<NextPiece>,
    pub status: GameStatus,
    pub game_over: bool,
    pub game_started: bool,
    pub is_paused: bool,
    pub tick_ms: u32,
    pub episode_id: u32,
    pub events: Vec<GameEvent>,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[RenderCell::Empty; GRID_WIDTH]; GRID_HEIGHT],
            score: 0,
            lines: 0,
            level: 1,
            next_piece: None,
            status: GameStatus::Idle,
            game_over: false,
            game_started: false,
            is_paused: false,
            tick_ms: 0,
            episode_id: 0,
            events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_cell_tokens() {
        assert_eq!(RenderCell::Empty.token(), None);
        assert_eq!(RenderCell::Filled(PieceKind::T).token().as_deref(), Some("#a000f0"));
        assert_eq!(
            RenderCell::Ghost(PieceKind::I).token().as_deref(),
            Some("ghost:#00f0f0")
        );
    }

    #[test]
    fn test_render_cell_serializes_as_token() {
        let row = [
            RenderCell::Empty,
            RenderCell::Filled(PieceKind::O),
            RenderCell::Ghost(PieceKind::O),
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r##"[null,"#f0f000","ghost:#f0f000"]"##);
    }

    #[test]
    fn test_next_piece_preview() {
        let next = NextPiece::from(PieceKind::S);
        assert_eq!(next.color, "#00f000");
        assert_eq!(next.shape, vec![vec![0, 1, 1], vec![1, 1, 0], vec![0, 0, 0]]);
    }
}
