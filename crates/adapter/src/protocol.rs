//! Broadcast message structures from the multiplayer authority.
//!
//! The server is authoritative: these models are read as-is and never
//! validated. Unknown fields are ignored and unknown event types are
//! skipped.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::DangerLevel;
use crate::types::GameEvent;

/// Match phase as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Waiting,
    Playing,
    Finished,
}

/// One player's board and counters in a room broadcast
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerBroadcast {
    #[serde(default)]
    pub nickname: String,
    /// Rendered grid, row 0 at the top; cells are color tokens or null.
    #[serde(default)]
    pub board: Vec<Vec<Option<String>>>,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub lines: u32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub alive: bool,
    #[serde(default)]
    pub next_piece: Option<String>,
    /// Player id this player currently sends garbage to
    #[serde(default)]
    pub target: Option<String>,
    /// Garbage rows queued against this player
    #[serde(default)]
    pub pending_garbage: u32,
    /// Events this player produced during the broadcast tick
    #[serde(default, deserialize_with = "known_events")]
    pub events: Vec<GameEvent>,
}

impl PlayerBroadcast {
    /// Danger level of this player's board
    pub fn danger_level(&self) -> DangerLevel {
        DangerLevel::from_occupancy(self.board.iter().flatten().map(Option::is_some))
    }
}

/// Full room broadcast
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomState {
    #[serde(default)]
    pub tick: u64,
    #[serde(default)]
    pub status: RoomStatus,
    /// Players by id
    #[serde(default)]
    pub players: BTreeMap<String, PlayerBroadcast>,
    /// Ids in elimination order, first out first
    #[serde(default)]
    pub eliminated_order: Vec<String>,
    #[serde(default)]
    pub host: String,
}

impl RoomState {
    pub fn player(&self, id: &str) -> Option<&PlayerBroadcast> {
        self.players.get(id)
    }
}

/// Parse one `game_state` broadcast payload
pub fn parse_room_state(payload: &str) -> Result<RoomState> {
    serde_json::from_str(payload).context("invalid room state broadcast")
}

/// Keep events this client understands, drop the rest
fn known_events<'de, D>(deserializer: D) -> std::result::Result<Vec<GameEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}
