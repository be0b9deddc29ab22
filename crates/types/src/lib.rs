//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the client.
//! All types are plain data with no behavior beyond parsing and formatting,
//! making them usable in any context (engine, session host, input mapping,
//! remote broadcast adapter).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn row**: pieces appear with their top row at `y = -1`
//!
//! # Gravity Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_MS` | 800 | Gravity period at level 1 |
//! | `SPEED_INCREMENT_MS` | 50 | Period reduction per level |
//! | `MIN_TICK_MS` | 100 | Period floor |
//!
//! The period at level `n` is `max(100, 800 - (n - 1) * 50)`:
//!
//! | Level | Period |
//! |-------|--------|
//! | 1 | 800ms |
//! | 2 | 750ms |
//! | 5 | 600ms |
//! | 10 | 350ms |
//! | 15+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use tetris_client_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color(), "#a000f0");
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! // Both the local camelCase names and the multiplayer wire names parse.
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(GameAction::from_str("hard_drop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row a freshly spawned piece's shape matrix starts on (one above the grid).
pub const SPAWN_Y: i8 = -1;

/// Gravity period at level 1 in milliseconds.
pub const BASE_TICK_MS: u32 = 800;

/// Gravity period reduction per level in milliseconds.
pub const SPEED_INCREMENT_MS: u32 = 50;

/// Gravity period floor in milliseconds.
pub const MIN_TICK_MS: u32 = 100;

/// Cleared lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded per row of hard-drop travel.
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Line clear scoring table, indexed by lines cleared in one lock.
///
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Points are multiplied by the level in effect when the piece locked.
pub const LINE_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

/// Combo count at which a `combo` event starts firing.
pub const COMBO_EVENT_THRESHOLD: u32 = 2;


/// The seven tetromino piece kinds
///
/// Each kind doubles as the palette identifier of the cells it leaves
/// behind; [`PieceKind::color`] yields the opaque color token.
/// - **I**: `#00f0f0`
/// - **O**: `#f0f000`
/// - **T**: `#a000f0`
/// - **S**: `#00f000`
/// - **Z**: `#f00000`
/// - **J**: `#0000f0`
/// - **L**: `#f0a000`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in the order the uniform sampler indexes them.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_client_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter, as the multiplayer broadcast names pieces.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Color token painted into every cell this kind occupies.
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "#00f0f0",
            PieceKind::O => "#f0f000",
            PieceKind::T => "#a000f0",
            PieceKind::S => "#00f000",
            PieceKind::Z => "#f00000",
            PieceKind::J => "#0000f0",
            PieceKind::L => "#f0a000",
        }
    }
}

/// Rotation states, indexed 0-3 clockwise from spawn
///
/// - **North** (0): Spawn orientation
/// - **East** (1): Rotated 90° clockwise
/// - **South** (2): Rotated 180°
/// - **West** (3): Rotated 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation index (0-3) used in wall-kick keys such as `0>1`.
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for an index, taken mod 4.
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_client_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

/// Commands the engine accepts from its presentation layer
///
/// Movement commands are no-ops unless the game is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Soft drop: one row down, locking if blocked
    MoveDown,
    /// Rotate 90° clockwise with wall kicks
    Rotate,
    /// Drop to the lowest legal row and lock
    HardDrop,
    /// Pause or resume a running game
    TogglePause,
    /// Reset everything and start a new game
    StartGame,
}

impl GameAction {
    /// Parse an action name
    ///
    /// Matching ignores case, `_` and `-`, so both the local camelCase names
    /// and the multiplayer wire names are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_client_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("move_left"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "moveleft" | "left" => Some(GameAction::MoveLeft),
            "moveright" | "right" => Some(GameAction::MoveRight),
            "movedown" | "softdrop" | "down" => Some(GameAction::MoveDown),
            "rotate" | "rotatecw" => Some(GameAction::Rotate),
            "harddrop" | "drop" => Some(GameAction::HardDrop),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            "startgame" | "start" | "restart" => Some(GameAction::StartGame),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::TogglePause => "togglePause",
            GameAction::StartGame => "startGame",
        }
    }
}

/// Engine lifecycle: `idle → running ⇄ paused`, `running → over`,
/// `over → running` on the next start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    Over,
}

/// Something that just happened, for sound and animation layers
///
/// Events are consumed once and then discarded. The local engine produces
/// `HardDrop`, `LineClear`, `Combo` and `B2bTetris`; garbage and elimination
/// events only arrive through the multiplayer broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    HardDrop {
        distance: u32,
    },
    LineClear {
        count: u32,
    },
    Combo {
        count: u32,
    },
    #[serde(rename = "b2b_tetris")]
    B2bTetris,
    GarbageSent {
        #[serde(default)]
        count: u32,
    },
    GarbageReceived {
        #[serde(default)]
        count: u32,
    },
    Elimination,
}

/// A settled board cell
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a piece of that kind (its palette id)
pub type Cell = Option<PieceKind>;
