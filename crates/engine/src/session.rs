//! Session host: one game, one gravity timer, one event log.
//!
//! The session owns its timer outright. After every command and tick it
//! recomputes the timer key, `(episode_id, level)` while running and `None`
//! otherwise; when the key changes the old timer is dropped and a fresh one
//! created, so at most one timer ever drives a session.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use tetris_client_core::{GameSnapshot, GameState};
use tetris_client_types::{GameAction, GameStatus};

use crate::config::SessionConfig;
use crate::event_log::EventLog;

/// What a gravity timer was created for: `(episode_id, level)`
pub type TimerKey = (u32, u32);

/// Periodic gravity source for one running episode at one level
#[derive(Debug)]
pub struct GravityTimer {
    key: TimerKey,
    interval: Interval,
}

impl GravityTimer {
    /// First tick fires one full period after creation.
    pub fn new(key: TimerKey, period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { key, interval }
    }

    pub fn key(&self) -> TimerKey {
        self.key
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// A game plus the resources that drive it
///
/// Timers are tokio timers: commands that start or resume a game must run
/// within a tokio runtime.
#[derive(Debug)]
pub struct Session {
    state: GameState,
    timer: Option<GravityTimer>,
    log: Option<EventLog>,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        let mut session = Self {
            state,
            timer: None,
            log: None,
        };
        session.sync_timer();
        session
    }

    /// Build a session from configuration, opening the event log and
    /// auto-starting as requested
    pub fn from_config(config: &SessionConfig) -> Self {
        let mut session = Self::new(GameState::new(config.seed));
        if let Some(path) = &config.event_log_path {
            session = session.with_event_log(EventLog::open(path));
        }
        if config.autostart {
            session.apply(GameAction::StartGame);
        }
        session
    }

    pub fn with_event_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply a command, then resynchronize the timer
    pub fn apply(&mut self, action: GameAction) -> bool {
        let changed = self.state.apply_action(action);
        self.sync_timer();
        changed
    }

    /// Apply a gravity tick, then resynchronize the timer
    pub fn tick(&mut self) -> bool {
        let changed = self.state.tick();
        self.sync_timer();
        changed
    }

    /// Key the current state wants a timer for
    pub fn wanted_timer_key(&self) -> Option<TimerKey> {
        (self.state.status() == GameStatus::Running)
            .then(|| (self.state.episode_id(), self.state.level()))
    }

    /// Key of the timer the session currently owns
    pub fn timer_key(&self) -> Option<TimerKey> {
        self.timer.as_ref().map(GravityTimer::key)
    }

    pub fn timer_period(&self) -> Option<Duration> {
        self.timer.as_ref().map(GravityTimer::period)
    }

    fn sync_timer(&mut self) {
        let wanted = self.wanted_timer_key();
        if self.timer_key() == wanted {
            return;
        }

        let period = Duration::from_millis(u64::from(self.state.drop_interval_ms()));
        self.timer = wanted.map(|key| GravityTimer::new(key, period));
    }

    /// Wait for the next gravity tick; pending forever without a timer
    pub async fn next_tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => timer.tick().await,
            None => std::future::pending().await,
        }
    }

    /// Drain pending events into a snapshot and log them
    pub fn publish(&mut self) -> GameSnapshot {
        let snapshot = self.state.take_snapshot();
        if let Some(log) = &self.log {
            log.record(&snapshot);
        }
        snapshot
    }

    /// Drop the timer and flush the event log
    pub async fn close(mut self) -> Result<()> {
        self.timer = None;
        if let Some(log) = self.log.take() {
            log.close().await?;
        }
        Ok(())
    }
}

/// Drive a session until the command channel closes
///
/// Publishes a snapshot up front and after every command and tick. A closed
/// update channel also ends the session.
pub async fn run_session(
    mut session: Session,
    mut commands: mpsc::Receiver<GameAction>,
    updates: mpsc::Sender<GameSnapshot>,
) -> Result<()> {
    if updates.send(session.publish()).await.is_err() {
        return session.close().await;
    }

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(action) => {
                    session.apply(action);
                }
                None => break,
            },
            _ = session.next_tick() => {
                session.tick();
            }
        }

        if updates.send(session.publish()).await.is_err() {
            eprintln!("[Session] Update receiver closed, stopping");
            break;
        }
    }

    session.close().await
}
