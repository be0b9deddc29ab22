//! Tetris client (workspace facade crate).
//!
//! This package exposes `tetris_client::{core,engine,input,adapter,types}`
//! while the implementation lives in dedicated crates under `crates/`.

pub use tetris_client_adapter as adapter;
pub use tetris_client_core as core;
pub use tetris_client_engine as engine;
pub use tetris_client_input as input;
pub use tetris_client_types as types;
