//! Consumption helpers for room broadcasts: event feed, opponents, host
//! detection, target cycling and outgoing input names.

use crate::protocol::{PlayerBroadcast, RoomState, RoomStatus};
use crate::types::{GameAction, GameEvent};

/// Events from one broadcast tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedBatch<'a> {
    pub mine: &'a [GameEvent],
    /// Opponents that produced at least one event, by id
    pub opponents: Vec<(&'a str, &'a [GameEvent])>,
}

impl FeedBatch<'_> {
    pub fn is_empty(&self) -> bool {
        self.mine.is_empty() && self.opponents.is_empty()
    }
}

/// Hands out each tick's events exactly once
///
/// Broadcasts can repeat a tick (reconnects, duplicate pushes); events are
/// only consumed when the tick differs from the last one observed, and only
/// while the match is playing.
#[derive(Debug, Clone, Default)]
pub struct BroadcastFeed {
    last_tick: Option<u64>,
}

impl BroadcastFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }

    pub fn observe<'a>(&mut self, state: &'a RoomState, my_id: Option<&str>) -> FeedBatch<'a> {
        if state.status != RoomStatus::Playing || self.last_tick == Some(state.tick) {
            return FeedBatch::default();
        }
        self.last_tick = Some(state.tick);

        let mine = my_id
            .and_then(|id| state.player(id))
            .map(|p| p.events.as_slice())
            .unwrap_or(&[]);

        let opponents = state
            .players
            .iter()
            .filter(|(id, p)| Some(id.as_str()) != my_id && !p.events.is_empty())
            .map(|(id, p)| (id.as_str(), p.events.as_slice()))
            .collect();

        FeedBatch { mine, opponents }
    }
}

/// Another player in the room
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opponent<'a> {
    pub id: &'a str,
    pub player: &'a PlayerBroadcast,
}

/// Every player except `my_id`, alive or not
pub fn opponents<'a>(state: &'a RoomState, my_id: &str) -> Vec<Opponent<'a>> {
    state
        .players
        .iter()
        .filter(|(id, _)| id.as_str() != my_id)
        .map(|(id, player)| Opponent {
            id: id.as_str(),
            player,
        })
        .collect()
}

pub fn is_host(state: &RoomState, my_id: &str) -> bool {
    !my_id.is_empty() && state.host == my_id
}

/// Round-robin choice of garbage target among alive opponents
#[derive(Debug, Clone, Default)]
pub struct TargetCycler {
    index: usize,
    last_status: RoomStatus,
}

impl TargetCycler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the room status; entering `playing` resets the rotation.
    pub fn track(&mut self, status: RoomStatus) {
        if self.last_status != RoomStatus::Playing && status == RoomStatus::Playing {
            self.index = 0;
        }
        self.last_status = status;
    }

    /// Advance to the next alive opponent and return its id
    pub fn cycle<'a>(&mut self, state: &'a RoomState, my_id: &str) -> Option<&'a str> {
        self.track(state.status);

        let alive: Vec<&str> = state
            .players
            .iter()
            .filter(|(id, p)| id.as_str() != my_id && p.alive)
            .map(|(id, _)| id.as_str())
            .collect();

        if alive.is_empty() {
            return None;
        }

        self.index = (self.index + 1) % alive.len();
        alive.get(self.index).copied()
    }
}

/// Input name the server expects for a gameplay action
///
/// Lifecycle actions are local only and have no wire name.
pub fn wire_action(action: GameAction) -> Option<&'static str> {
    match action {
        GameAction::MoveLeft => Some("move_left"),
        GameAction::MoveRight => Some("move_right"),
        GameAction::MoveDown => Some("move_down"),
        GameAction::Rotate => Some("rotate"),
        GameAction::HardDrop => Some("hard_drop"),
        GameAction::TogglePause | GameAction::StartGame => None,
    }
}

/// Wire name to send for `action`, or `None` outside a playing match
pub fn outgoing_input(state: &RoomState, action: GameAction) -> Option<&'static str> {
    if state.status != RoomStatus::Playing {
        return None;
    }
    wire_action(action)
}
