//! Adapter module - consumption of the multiplayer server's room broadcasts
//!
//! In a multiplayer match the server runs the game; this client only renders
//! what it is told and forwards inputs. The adapter covers the client side of
//! that contract:
//!
//! # Message Types
//!
//! ## Server → Client
//!
//! - **game_state**: full room snapshot ([`protocol::RoomState`]) with a
//!   monotonically increasing `tick`, the match `status`, every player's
//!   board and counters, the elimination order and the host id
//!
//! ## Client → Server
//!
//! - **input**: one gameplay action by wire name (see [`feed::wire_action`])
//! - **set_target**: garbage target chosen by [`feed::TargetCycler`]
//!
//! # Example Broadcast
//!
//! ```text
//! {"tick":42,"status":"playing","host":"p1","eliminated_order":[],
//!  "players":{"p1":{"nickname":"ada","board":[[null,"#00f0f0",...],...],
//!  "score":1200,"lines":7,"level":1,"alive":true,"next_piece":"T",
//!  "target":"p2","pending_garbage":3,"events":[{"type":"line_clear","count":2}]}}}
//! ```
//!
//! # Implementation
//!
//! - Broadcasts are trusted; nothing here re-validates game rules
//! - Per-player events are consumed once per tick by [`feed::BroadcastFeed`]
//! - Transport (channels, sockets) belongs to the host application

pub mod feed;
pub mod protocol;

pub use tetris_client_core as core;
pub use tetris_client_types as types;

pub use feed::{
    is_host, opponents, outgoing_input, wire_action, BroadcastFeed, FeedBatch, Opponent,
    TargetCycler,
};
pub use protocol::{parse_room_state, PlayerBroadcast, RoomState, RoomStatus};
