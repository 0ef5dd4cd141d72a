use super::config::SessionConfig;
use super::stats::SessionStats;
use crate::engine::PhraseSegmenter;
use crate::events::{Phrase, Snapshot, TranscriptEvent};
use crate::sink::OutputSink;
use crate::source::SnapshotSource;
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// A transcription session that funnels caption snapshots through the
/// segmentation engine and delivers transcript events to a sink
///
/// All snapshots, whatever trigger produced them, pass through one ingest
/// task holding the segmenter lock, so engine state is never mutated
/// concurrently or reentrantly.
pub struct TranscriptionSession {
    /// Session configuration
    config: SessionConfig,

    /// Where transcript events are delivered
    sink: Arc<dyn OutputSink>,

    /// The segmentation engine; locked only by the ingest task and the
    /// stats/transcript accessors
    segmenter: Arc<Mutex<PhraseSegmenter>>,

    /// The snapshot source, kept so `stop` can shut it down
    source: Mutex<Option<Box<dyn SnapshotSource>>>,

    /// When the session started
    started_at: chrono::DateTime<chrono::Utc>,

    /// Whether the session is currently consuming snapshots
    is_running: Arc<AtomicBool>,

    /// Wakes the ingest task on shutdown
    shutdown: Arc<Notify>,

    /// Number of snapshots absorbed
    snapshots_processed: Arc<AtomicUsize>,

    /// Number of phrases finalized (history eviction does not decrease this)
    phrases_finalized: Arc<AtomicUsize>,

    /// Handle for the ingest task
    ingest_task: Mutex<Option<JoinHandle<()>>>,
}

impl TranscriptionSession {
    /// Create a new transcription session delivering events to `sink`
    pub fn new(config: SessionConfig, sink: Arc<dyn OutputSink>) -> Self {
        info!("Creating transcription session: {}", config.session_id);

        let segmenter = PhraseSegmenter::new(config.engine.clone());

        Self {
            config,
            sink,
            segmenter: Arc::new(Mutex::new(segmenter)),
            source: Mutex::new(None),
            started_at: Utc::now(),
            is_running: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(Notify::new()),
            snapshots_processed: Arc::new(AtomicUsize::new(0)),
            phrases_finalized: Arc::new(AtomicUsize::new(0)),
            ingest_task: Mutex::new(None),
        }
    }

    /// Start consuming snapshots from `source`
    pub async fn start(&self, mut source: Box<dyn SnapshotSource>) -> Result<()> {
        if self.is_running.load(Ordering::SeqCst) {
            warn!("Session already started");
            return Ok(());
        }

        info!(
            "Starting transcription session {} from source '{}'",
            self.config.session_id,
            source.name()
        );

        let mut snapshot_rx = source
            .start()
            .await
            .context("Failed to start snapshot source")?;

        self.is_running.store(true, Ordering::SeqCst);

        let sink = Arc::clone(&self.sink);
        let segmenter = Arc::clone(&self.segmenter);
        let is_running = Arc::clone(&self.is_running);
        let shutdown = Arc::clone(&self.shutdown);
        let snapshots_processed = Arc::clone(&self.snapshots_processed);
        let phrases_finalized = Arc::clone(&self.phrases_finalized);
        let coalesce = self.config.coalesce_backlog;

        let ingest_task = tokio::spawn(async move {
            info!("Snapshot ingest task started");

            loop {
                let received = tokio::select! {
                    maybe = snapshot_rx.recv() => maybe,
                    _ = shutdown.notified() => None,
                };
                let Some(snapshot) = received else {
                    break;
                };
                if !is_running.load(Ordering::SeqCst) {
                    break;
                }

                let snapshot = if coalesce {
                    drain_to_latest(&mut snapshot_rx, snapshot)
                } else {
                    snapshot
                };

                let events = {
                    let mut segmenter = segmenter.lock().await;
                    segmenter.on_snapshot(&snapshot.text, snapshot.observed_at_ms)
                };
                snapshots_processed.fetch_add(1, Ordering::SeqCst);

                for event in &events {
                    if matches!(event, TranscriptEvent::PhraseEnd { .. }) {
                        phrases_finalized.fetch_add(1, Ordering::SeqCst);
                    }
                    if let Err(e) = sink.emit(event).await {
                        error!("Failed to deliver transcript event: {}", e);
                    }
                }
            }

            info!("Snapshot ingest task stopped");
        });

        {
            let mut handle = self.ingest_task.lock().await;
            *handle = Some(ingest_task);
        }
        {
            let mut slot = self.source.lock().await;
            *slot = Some(source);
        }

        info!("Transcription session started successfully");

        Ok(())
    }

    /// Wait until the snapshot source is exhausted and every pending snapshot
    /// has been absorbed
    pub async fn join(&self) -> Result<()> {
        let handle = {
            let mut slot = self.ingest_task.lock().await;
            slot.take()
        };
        if let Some(task) = handle {
            if let Err(e) = task.await {
                error!("Ingest task panicked: {}", e);
            }
        }
        Ok(())
    }

    /// Stop the session, finalize the open phrase, and return final stats
    pub async fn stop(&self) -> Result<SessionStats> {
        if !self.is_running.load(Ordering::SeqCst) {
            warn!("Session not active");
            return Ok(self.stats().await);
        }

        info!("Stopping transcription session: {}", self.config.session_id);

        self.is_running.store(false, Ordering::SeqCst);
        // notify_one stores a permit, so the ingest task sees the shutdown
        // even if it is mid-snapshot rather than parked on the channel
        self.shutdown.notify_one();

        // Shut the source down first so the snapshot channel closes
        {
            let mut slot = self.source.lock().await;
            if let Some(mut source) = slot.take() {
                if let Err(e) = source.stop().await {
                    error!("Failed to stop snapshot source: {}", e);
                }
            }
        }

        self.join().await?;

        // The last utterance is still open; close it out
        let events = {
            let mut segmenter = self.segmenter.lock().await;
            segmenter.flush()
        };
        for event in &events {
            if matches!(event, TranscriptEvent::PhraseEnd { .. }) {
                self.phrases_finalized.fetch_add(1, Ordering::SeqCst);
            }
            if let Err(e) = self.sink.emit(event).await {
                error!("Failed to deliver transcript event: {}", e);
            }
        }

        info!("Transcription session stopped successfully");

        Ok(self.stats().await)
    }

    /// Get current session statistics
    pub async fn stats(&self) -> SessionStats {
        let duration = Utc::now().signed_duration_since(self.started_at);

        let (total_words, avg_words_per_sec) = {
            let segmenter = self.segmenter.lock().await;
            (segmenter.total_words(), segmenter.avg_words_per_sec())
        };

        SessionStats {
            is_running: self.is_running.load(Ordering::SeqCst),
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            snapshots_processed: self.snapshots_processed.load(Ordering::SeqCst),
            phrases_finalized: self.phrases_finalized.load(Ordering::SeqCst),
            total_words,
            avg_words_per_sec,
        }
    }

    /// Get the finalized transcript accumulated so far
    pub async fn transcript(&self) -> Vec<Phrase> {
        let segmenter = self.segmenter.lock().await;
        segmenter.phrases().iter().cloned().collect()
    }
}

/// Drop a backlog of pending snapshots, keeping only the newest.
///
/// Snapshots are full rewrites, so when the ingest task falls behind there is
/// no point diffing through intermediate states it already missed.
fn drain_to_latest(rx: &mut mpsc::Receiver<Snapshot>, first: Snapshot) -> Snapshot {
    let mut latest = first;
    let mut skipped = 0usize;
    while let Ok(newer) = rx.try_recv() {
        latest = newer;
        skipped += 1;
    }
    if skipped > 0 {
        info!("Coalesced {} stale snapshots", skipped);
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(text: &str, at_ms: u64) -> Snapshot {
        Snapshot {
            text: text.to_string(),
            observed_at_ms: at_ms,
        }
    }

    #[tokio::test]
    async fn test_drain_to_latest_keeps_newest() {
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(snapshot("b", 100)).await.unwrap();
        tx.send(snapshot("c", 200)).await.unwrap();

        let latest = drain_to_latest(&mut rx, snapshot("a", 0));

        assert_eq!(latest.text, "c");
        assert_eq!(latest.observed_at_ms, 200);
    }

    #[tokio::test]
    async fn test_drain_to_latest_empty_backlog() {
        let (_tx, mut rx) = mpsc::channel::<Snapshot>(8);

        let latest = drain_to_latest(&mut rx, snapshot("only", 50));

        assert_eq!(latest.text, "only");
    }
}
