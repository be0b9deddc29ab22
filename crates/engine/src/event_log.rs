//! Append-only JSON-lines log of game events.
//!
//! Records are serialized and written by a spawned task so the session never
//! waits on the filesystem.

use std::path::PathBuf;

use serde::Serialize;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use tetris_client_core::GameSnapshot;
use tetris_client_types::GameEvent;

/// One logged event with the counters in effect when it was drained
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub episode_id: u32,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    #[serde(flatten)]
    pub event: GameEvent,
}

/// Handle to the log writer task
#[derive(Debug)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<EventRecord>,
    writer: JoinHandle<()>,
}

impl EventLog {
    /// Spawn the writer task for `path`
    ///
    /// Must be called within a tokio runtime. A file that cannot be opened
    /// is reported once on stderr and every later record is dropped.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<EventRecord>();

        let writer = tokio::spawn(async move {
            let mut file = match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await
            {
                Ok(f) => f,
                Err(err) => {
                    eprintln!("[EventLog] Cannot open {}: {}", path.display(), err);
                    return;
                }
            };

            let mut buf: Vec<u8> = Vec::with_capacity(256);

            while let Some(record) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &record).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if let Err(err) = file.write_all(&buf).await {
                    eprintln!("[EventLog] Write to {} failed: {}", path.display(), err);
                    break;
                }
            }

            let _ = file.flush().await;
        });

        Self { tx, writer }
    }

    /// Queue one record per event in the snapshot's drained batch
    pub fn record(&self, snapshot: &GameSnapshot) {
        for &event in &snapshot.events {
            // The writer may have shut down; logging is best effort.
            let _ = self.tx.send(EventRecord {
                episode_id: snapshot.episode_id,
                score: snapshot.score,
                lines: snapshot.lines,
                level: snapshot.level,
                event,
            });
        }
    }

    /// Stop accepting records and wait until queued ones are on disk
    pub async fn close(self) -> anyhow::Result<()> {
        let Self { tx, writer } = self;
        drop(tx);
        writer.await?;
        Ok(())
    }
}
