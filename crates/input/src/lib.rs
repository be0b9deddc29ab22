//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`]. There is no
//! auto-repeat handling: one key press is one command.

pub mod map;

pub use tetris_client_types as types;

pub use map::{handle_key_event, should_quit};
