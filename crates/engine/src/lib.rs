//! Session host for the falling-piece engine.
//!
//! The core crate owns no clock. This crate pairs a [`GameState`] with an
//! explicitly owned tokio gravity timer, an optional JSON-lines event log,
//! and environment-driven configuration.
//!
//! [`GameState`]: tetris_client_core::GameState

pub mod config;
pub mod event_log;
pub mod session;

pub use config::SessionConfig;
pub use event_log::{EventLog, EventRecord};
pub use session::{run_session, GravityTimer, Session, TimerKey};
