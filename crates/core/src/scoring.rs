//! Scoring module - line-clear points, level progression and gravity speed
//!
//! Rules:
//! - A lock clearing `n` lines scores `LINE_POINTS[n] × level`, with the
//!   level read *before* this lock's lines are added.
//! - Hard drop scores 2 points per row travelled.
//! - `level = lines / 10 + 1`.
//! - Combo and back-to-back chains only produce events; they add no points.

use arrayvec::ArrayVec;

use crate::types::{
    GameEvent, BASE_TICK_MS, COMBO_EVENT_THRESHOLD, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL,
    LINE_POINTS, MIN_TICK_MS, SPEED_INCREMENT_MS,
};

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: level in effect when the piece locked (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_POINTS[lines].saturating_mul(level)
}

/// Score for a hard drop of `distance` rows
pub fn calculate_drop_score(distance: u32) -> u32 {
    distance.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level reached after `lines` total cleared lines
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity period for a level, floored at `MIN_TICK_MS`
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(SPEED_INCREMENT_MS);
    BASE_TICK_MS.saturating_sub(speedup).max(MIN_TICK_MS)
}

/// Combo and back-to-back tetris state carried across locks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChainTracker {
    combo: u32,
    last_was_tetris: bool,
}

impl ChainTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn last_was_tetris(&self) -> bool {
        self.last_was_tetris
    }

    /// Record one lock and return the events it produces, in order:
    /// `line_clear`, then `combo` (count >= 2), then `b2b_tetris`.
    pub fn record_lock(&mut self, lines: usize) -> ArrayVec<GameEvent, 3> {
        let mut events = ArrayVec::new();

        if lines == 0 {
            self.combo = 0;
            self.last_was_tetris = false;
            return events;
        }

        events.push(GameEvent::LineClear {
            count: lines as u32,
        });

        self.combo += 1;
        if self.combo >= COMBO_EVENT_THRESHOLD {
            events.push(GameEvent::Combo { count: self.combo });
        }

        let is_tetris = lines == 4;
        if is_tetris && self.last_was_tetris {
            events.push(GameEvent::B2bTetris);
        }
        self.last_was_tetris = is_tetris;

        events
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
