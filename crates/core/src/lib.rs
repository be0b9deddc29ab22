//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, timers, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed (or piece script) produces identical games
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Any host can drive it with ticks and commands
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 settled-cell grid with placement legality and line clearing
//! - [`game_state`]: Lifecycle, active piece, commands, locking, rendering
//! - [`pieces`]: Shape matrices, runtime rotation and wall-kick tables
//! - [`rng`]: Uniform piece sampling behind the [`PieceSource`] seam
//! - [`scoring`]: Line points, levels, gravity speed and combo/b2b chains
//! - [`snapshot`]: Render grid and the snapshot handed to presentation
//! - [`danger`]: How close a board is to topping out
//!
//! # Game Rules
//!
//! - **Uniform pieces**: every draw is independent; no bag
//! - **Clockwise rotation only**, with wall kicks (I has its own table)
//! - **Immediate lock**: a piece locks on the first blocked downward step
//! - **Ghost piece**: painted into the render grid, never into the board
//! - **Scoring**: `[0, 100, 300, 500, 800][lines] × level`, plus 2 per
//!   hard-dropped row
//!
//! # Example
//!
//! ```
//! use tetris_client_core::GameState;
//! use tetris_client_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::StartGame);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The engine owns no clock. A host calls [`GameState::tick`] once every
//! [`GameState::drop_interval_ms`] while the game is running; the period is
//! `max(100, 800 - (level - 1) × 50)` milliseconds.

pub mod board;
pub mod danger;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_client_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use danger::DangerLevel;
pub use game_state::{GameState, Tetromino};
pub use pieces::{kicks, try_rotate, Shape};
pub use rng::{PieceSource, ScriptedPieces, SimpleRng, UniformPieces};
pub use scoring::{
    calculate_drop_score, calculate_line_score, get_drop_interval_ms, level_for_lines,
    ChainTracker,
};
pub use snapshot::{GameSnapshot, NextPiece, RenderCell, RenderGrid};
