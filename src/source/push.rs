//! Push-driven snapshot source
//!
//! For embedders that observe the caption surface themselves (a change
//! notification hook, a poll loop) and push each observed full text in. The
//! injector is cheap to clone, so several triggers can feed one session; the
//! session serializes processing regardless of who pushed.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use super::SnapshotSource;
use crate::events::Snapshot;

pub struct PushSource {
    receiver: Option<mpsc::Receiver<Snapshot>>,
    is_active: Arc<AtomicBool>,
}

/// Handle for pushing snapshots into a `PushSource`
#[derive(Clone)]
pub struct SnapshotInjector {
    sender: mpsc::Sender<Snapshot>,
}

impl PushSource {
    /// Create a push source and the injector that feeds it
    pub fn new(capacity: usize) -> (Self, SnapshotInjector) {
        let (sender, receiver) = mpsc::channel(capacity);
        let source = Self {
            receiver: Some(receiver),
            is_active: Arc::new(AtomicBool::new(false)),
        };
        (source, SnapshotInjector { sender })
    }
}

impl SnapshotInjector {
    /// Push one observed snapshot
    pub async fn push(&self, text: impl Into<String>, observed_at_ms: u64) -> Result<()> {
        self.sender
            .send(Snapshot {
                text: text.into(),
                observed_at_ms,
            })
            .await
            .context("Snapshot channel closed")
    }
}

#[async_trait::async_trait]
impl SnapshotSource for PushSource {
    async fn start(&mut self) -> Result<mpsc::Receiver<Snapshot>> {
        let receiver = self
            .receiver
            .take()
            .context("Push source already started")?;
        self.is_active.store(true, Ordering::SeqCst);
        info!("Push source started");
        Ok(receiver)
    }

    async fn stop(&mut self) -> Result<()> {
        self.is_active.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "push"
    }
}
