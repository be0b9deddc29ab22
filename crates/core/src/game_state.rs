//! Game state module - the falling-piece engine
//!
//! This module ties together all core components: board, pieces, piece
//! source and scoring. It owns the lifecycle (`idle → running ⇄ paused →
//! over`), consumes gravity ticks and player commands, and produces a
//! render-ready grid plus a batch of game events.

use crate::board::{Board, GRID_HEIGHT, GRID_WIDTH};
use crate::pieces::{try_rotate, Shape};
use crate::rng::{PieceSource, UniformPieces};
use crate::scoring::{
    calculate_drop_score, calculate_line_score, get_drop_interval_ms, level_for_lines,
    ChainTracker,
};
use crate::snapshot::{GameSnapshot, NextPiece, RenderCell, RenderGrid};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at its spawn position: horizontally
    /// centered, matrix top row one above the grid.
    pub fn new(kind: PieceKind) -> Self {
        let shape = Shape::for_kind(kind);
        Self {
            kind,
            shape,
            rotation: Rotation::North,
            x: ((BOARD_WIDTH - shape.size()) / 2) as i8,
            y: SPAWN_Y,
        }
    }

    /// Board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape.cells().map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Check placement legality on the board
    pub fn fits(&self, board: &Board) -> bool {
        board.can_place(&self.shape, self.x, self.y)
    }
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    next: Option<PieceKind>,
    source: Box<dyn PieceSource>,
    status: GameStatus,
    /// Monotonic game id (increments on every start).
    episode_id: u32,
    score: u32,
    lines: u32,
    level: u32,
    chain: ChainTracker,
    /// Events from the most recent command or tick, until taken.
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game drawing uniformly random pieces from `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_source(UniformPieces::new(seed))
    }

    /// Create an idle game drawing pieces from `source`
    pub fn with_source(source: impl PieceSource + 'static) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            source: Box::new(source),
            status: GameStatus::Idle,
            episode_id: 0,
            score: 0,
            lines: 0,
            level: 1,
            chain: ChainTracker::new(),
            events: Vec::new(),
        }
    }

    /// Reset board, counters and chains, then spawn the first piece
    ///
    /// Valid from any state; this is also how an `over` game restarts.
    pub fn start_game(&mut self) {
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.chain.reset();
        self.events.clear();
        self.status = GameStatus::Running;
        self.episode_id = self.episode_id.wrapping_add(1);

        let first = self.source.draw();
        self.next = Some(self.source.draw());
        self.spawn(first);
    }

    /// Flip between running and paused; no-op when idle or over
    pub fn toggle_pause(&mut self) -> bool {
        self.events.clear();
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::Idle | GameStatus::Over => return false,
        };
        true
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    pub fn game_started(&self) -> bool {
        self.status != GameStatus::Idle
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.chain.combo()
    }

    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Current gravity period
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    /// Events produced by the most recent command or tick
    ///
    /// Every command and tick starts a fresh batch, so a host that never
    /// drains still holds at most one lock's worth of events.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain pending events; each event is handed out exactly once
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The running piece, if commands should affect it
    fn playable(&self) -> Option<Tetromino> {
        if self.status == GameStatus::Running {
            self.active
        } else {
            None
        }
    }

    /// Spawn `kind`, or end the game if the board is too full
    ///
    /// The piece is placed one row above the grid but legality is checked
    /// one row lower, where it sits after its first settle.
    fn spawn(&mut self, kind: PieceKind) -> bool {
        let piece = Tetromino::new(kind);

        if !piece.shifted(0, 1).fits(&self.board) {
            self.status = GameStatus::Over;
            self.active = None;
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Promote the look-ahead piece and draw a fresh one
    fn spawn_next(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.source.draw(),
        };
        self.next = Some(self.source.draw());
        self.spawn(kind)
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.playable() else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if moved.fits(&self.board) {
            self.active = Some(moved);
            return true;
        }

        false
    }

    /// Gravity step: one row down, or lock when blocked
    fn step_down(&mut self) -> bool {
        if self.playable().is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Scheduled gravity tick; no-op unless running
    pub fn tick(&mut self) -> bool {
        self.events.clear();
        self.step_down()
    }

    pub fn move_left(&mut self) -> bool {
        self.events.clear();
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.events.clear();
        self.try_move(1, 0)
    }

    /// Soft drop, with the same lock behavior as gravity
    pub fn move_down(&mut self) -> bool {
        self.events.clear();
        self.step_down()
    }

    /// Rotate clockwise with wall kicks; state is unchanged on rejection
    pub fn rotate(&mut self) -> bool {
        self.events.clear();
        let Some(active) = self.playable() else {
            return false;
        };

        let board = &self.board;
        let result = try_rotate(
            active.kind,
            &active.shape,
            active.rotation,
            active.x,
            active.y,
            |shape, x, y| board.can_place(shape, x, y),
        );

        match result {
            Some(rotated) => {
                self.active = Some(Tetromino {
                    shape: rotated.shape,
                    rotation: rotated.rotation,
                    x: rotated.x,
                    y: rotated.y,
                    ..active
                });
                true
            }
            None => false,
        }
    }

    /// Rows the piece can fall before the next row down is illegal
    fn drop_distance(&self, piece: &Tetromino) -> u32 {
        let mut distance: i8 = 0;
        while piece.shifted(0, distance + 1).fits(&self.board) {
            distance += 1;
        }
        distance as u32
    }

    /// Hard drop the active piece to the bottom and lock it
    ///
    /// Scores 2 points per row and emits `hard_drop` when the piece moved.
    pub fn hard_drop(&mut self) -> bool {
        self.events.clear();
        let Some(active) = self.playable() else {
            return false;
        };

        let distance = self.drop_distance(&active);
        self.active = Some(active.shifted(0, distance as i8));
        self.score = self.score.saturating_add(calculate_drop_score(distance));
        if distance > 0 {
            self.events.push(GameEvent::HardDrop { distance });
        }

        self.lock_piece();
        true
    }

    /// Merge the active piece, clear lines, score, then spawn the next piece
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .merge(&active.shape, active.x, active.y, active.kind);
        let cleared = self.board.clear_full_rows().len();

        if cleared > 0 {
            // Score with the level in effect before these lines count.
            let level_at_lock = self.level;
            self.score = self
                .score
                .saturating_add(calculate_line_score(cleared, level_at_lock));
            self.lines += cleared as u32;
            self.level = level_for_lines(self.lines);
        }

        self.events.extend(self.chain.record_lock(cleared));

        self.spawn_next();
    }

    /// Where the active piece would land if hard-dropped
    pub fn ghost(&self) -> Option<Tetromino> {
        let active = self.active?;
        Some(active.shifted(0, self.drop_distance(&active) as i8))
    }

    /// Paint settled cells, then the ghost, then the active piece
    ///
    /// The settled board itself is never touched.
    pub fn render_into(&self, grid: &mut RenderGrid) {
        for (out_row, row) in grid.iter_mut().zip(self.board.rows()) {
            for (out, cell) in out_row.iter_mut().zip(row) {
                *out = match cell {
                    Some(kind) => RenderCell::Filled(*kind),
                    None => RenderCell::Empty,
                };
            }
        }

        let Some(active) = self.active else {
            return;
        };

        if let Some(ghost) = self.ghost() {
            for (x, y) in ghost.cells() {
                if let Some(cell) = grid_cell(grid, x, y) {
                    if cell.is_empty() {
                        *cell = RenderCell::Ghost(ghost.kind);
                    }
                }
            }
        }

        for (x, y) in active.cells() {
            if let Some(cell) = grid_cell(grid, x, y) {
                *cell = RenderCell::Filled(active.kind);
            }
        }
    }

    pub fn render(&self) -> RenderGrid {
        let mut grid = [[RenderCell::Empty; GRID_WIDTH]; GRID_HEIGHT];
        self.render_into(&mut grid);
        grid
    }

    /// Read-only snapshot; pending events are copied, not drained
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.render(),
            score: self.score,
            lines: self.lines,
            level: self.level,
            next_piece: self.next.map(NextPiece::from),
            status: self.status,
            game_over: self.game_over(),
            game_started: self.game_started(),
            is_paused: self.is_paused(),
            tick_ms: self.drop_interval_ms(),
            episode_id: self.episode_id,
            events: self.events.clone(),
        }
    }

    /// Snapshot that drains pending events into it
    pub fn take_snapshot(&mut self) -> GameSnapshot {
        let mut snapshot = self.snapshot();
        snapshot.events = self.take_events();
        snapshot
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::StartGame => {
                self.start_game();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

fn grid_cell(grid: &mut RenderGrid, x: i8, y: i8) -> Option<&mut RenderCell> {
    if x < 0 || y < 0 {
        return None;
    }
    grid.get_mut(y as usize)?.get_mut(x as usize)
}
