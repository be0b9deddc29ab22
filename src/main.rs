//! Tetris client host (default binary).
//!
//! Runs one session on a current-thread tokio runtime and writes one JSON
//! snapshot per update to stdout. Commands come from the terminal (crossterm
//! raw mode) or, in headless mode or when stdin is not a terminal, from
//! stdin lines such as `moveLeft`, `hard_drop` or `quit`.

use std::io::{IsTerminal, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use tetris_client::core::GameSnapshot;
use tetris_client::engine::{run_session, Session, SessionConfig};
use tetris_client::input::{handle_key_event, should_quit};
use tetris_client::types::GameAction;

const CHANNEL_CAPACITY: usize = 64;

fn main() -> Result<()> {
    let config = SessionConfig::from_env();
    let interactive = !config.headless && std::io::stdin().is_terminal();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let raw_mode = if interactive {
        Some(RawMode::enter()?)
    } else {
        None
    };

    let result = runtime.block_on(run(config, interactive));

    // Always try to restore terminal state.
    drop(raw_mode);
    // A blocked stdin read must not hold the process open.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn run(config: SessionConfig, interactive: bool) -> Result<()> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameAction>(CHANNEL_CAPACITY);
    let (update_tx, mut update_rx) = mpsc::channel::<GameSnapshot>(CHANNEL_CAPACITY);

    if interactive {
        spawn_key_reader(cmd_tx);
    } else {
        tokio::spawn(async move {
            if let Err(err) = read_stdin_commands(cmd_tx).await {
                eprintln!("[Input] stdin error: {:#}", err);
            }
        });
    }

    let session = Session::from_config(&config);
    let session_task = tokio::spawn(run_session(session, cmd_rx, update_tx));

    // Raw mode disables the terminal's newline translation.
    let line_end = if interactive { "\r\n" } else { "\n" };
    let mut stdout = std::io::stdout();

    while let Some(snapshot) = update_rx.recv().await {
        let line = serde_json::to_string(&snapshot).context("failed to serialize snapshot")?;
        write!(stdout, "{}{}", line, line_end)?;
        stdout.flush()?;
    }

    session_task.await.context("session task failed")?
}

/// Forward terminal key presses until quit
fn spawn_key_reader(tx: mpsc::Sender<GameAction>) {
    std::thread::spawn(move || loop {
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => {}
            Ok(false) => {
                if tx.is_closed() {
                    return;
                }
                continue;
            }
            Err(err) => {
                eprintln!("[Input] Terminal poll failed: {}", err);
                return;
            }
        }

        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(err) => {
                eprintln!("[Input] Terminal read failed: {}", err);
                return;
            }
        };

        if should_quit(key) {
            return;
        }
        if let Some(action) = handle_key_event(key) {
            if tx.blocking_send(action).is_err() {
                return;
            }
        }
    });
}

/// Forward one command per stdin line until EOF or `quit`
async fn read_stdin_commands(tx: mpsc::Sender<GameAction>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if command.eq_ignore_ascii_case("quit") || command.eq_ignore_ascii_case("q") {
            break;
        }

        match GameAction::from_str(command) {
            Some(action) => {
                if tx.send(action).await.is_err() {
                    break;
                }
            }
            None => eprintln!("[Input] Ignoring unknown command: {}", command),
        }
    }

    Ok(())
}

/// Terminal raw mode, restored on drop
struct RawMode;

impl RawMode {
    fn enter() -> Result<Self> {
        crossterm::terminal::enable_raw_mode().context("failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}
