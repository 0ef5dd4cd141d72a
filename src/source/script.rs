//! Scripted snapshot source
//!
//! Replays a recorded sequence of caption snapshots, either as fast as the
//! engine can absorb them or paced to the recorded timing. The file format is
//! one snapshot per line, `<offset_ms><TAB><text>`; blank lines and lines
//! starting with `#` are skipped.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::SnapshotSource;
use crate::events::Snapshot;

pub struct ScriptSource {
    entries: Vec<Snapshot>,
    realtime: bool,
    is_active: Arc<AtomicBool>,
    replay_task: Option<JoinHandle<()>>,
}

impl ScriptSource {
    /// Load a caption script from a file
    pub fn from_file(path: &str, realtime: bool) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read caption script {}", path))?;
        let entries = parse_script(&raw)
            .with_context(|| format!("Failed to parse caption script {}", path))?;

        info!(
            "Loaded caption script {} ({} snapshots)",
            Path::new(path).display(),
            entries.len()
        );

        Ok(Self::from_entries(entries, realtime))
    }

    /// Replay an in-memory snapshot sequence
    pub fn from_entries(entries: Vec<Snapshot>, realtime: bool) -> Self {
        Self {
            entries,
            realtime,
            is_active: Arc::new(AtomicBool::new(false)),
            replay_task: None,
        }
    }

    /// Built-in demo script: a short meeting opening with the usual caption
    /// artifacts (mid-word cuts, a long pause, a topic change)
    pub fn demo() -> Self {
        let script = [
            (0, "Hello, welcome to the meeting."),
            (600, "Hello, welcome to the meeting. Today we're going to disc"),
            (1200, "Hello, welcome to the meeting. Today we're going to discuss the timeline."),
            (1900, "Hello, welcome to the meeting. Today we're going to discuss the timeline. First, our progress."),
            (5400, "Does anyone have questions?"),
            (6100, "Does anyone have questions? We need to finalize today."),
        ];
        let entries = script
            .into_iter()
            .map(|(offset_ms, text)| Snapshot {
                text: text.to_string(),
                observed_at_ms: offset_ms,
            })
            .collect();
        Self::from_entries(entries, true)
    }
}

#[async_trait::async_trait]
impl SnapshotSource for ScriptSource {
    async fn start(&mut self) -> Result<mpsc::Receiver<Snapshot>> {
        let (tx, rx) = mpsc::channel(64);

        let entries = self.entries.clone();
        let realtime = self.realtime;
        let is_active = Arc::clone(&self.is_active);
        is_active.store(true, Ordering::SeqCst);

        let task = tokio::spawn(async move {
            let mut last_offset_ms = 0u64;
            for snapshot in entries {
                if !is_active.load(Ordering::SeqCst) {
                    break;
                }
                if realtime {
                    let gap = snapshot.observed_at_ms.saturating_sub(last_offset_ms);
                    if gap > 0 {
                        tokio::time::sleep(Duration::from_millis(gap)).await;
                    }
                }
                last_offset_ms = snapshot.observed_at_ms;
                if tx.send(snapshot).await.is_err() {
                    warn!("Snapshot receiver dropped, stopping replay");
                    break;
                }
            }
            is_active.store(false, Ordering::SeqCst);
            info!("Caption script replay finished");
        });
        self.replay_task = Some(task);

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.is_active.store(false, Ordering::SeqCst);
        if let Some(task) = self.replay_task.take() {
            task.abort();
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "script"
    }
}

/// Parse `<offset_ms><TAB><text>` lines into snapshots
fn parse_script(raw: &str) -> Result<Vec<Snapshot>> {
    let mut entries = Vec::new();
    for (line_no, line) in raw.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let (offset, text) = line
            .split_once('\t')
            .with_context(|| format!("Line {}: expected <offset_ms><TAB><text>", line_no + 1))?;
        let observed_at_ms: u64 = offset
            .trim()
            .parse()
            .with_context(|| format!("Line {}: bad offset {:?}", line_no + 1, offset))?;
        entries.push(Snapshot {
            text: text.to_string(),
            observed_at_ms,
        });
    }
    Ok(entries)
}
