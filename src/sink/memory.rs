//! In-memory event collection

use anyhow::Result;
use tokio::sync::Mutex;

use super::OutputSink;
use crate::events::TranscriptEvent;

/// Sink that stores every event it receives, in order
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<TranscriptEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events received so far
    pub async fn events(&self) -> Vec<TranscriptEvent> {
        self.events.lock().await.clone()
    }

    /// Drain and return all events received so far
    pub async fn take(&self) -> Vec<TranscriptEvent> {
        std::mem::take(&mut *self.events.lock().await)
    }
}

#[async_trait::async_trait]
impl OutputSink for MemorySink {
    async fn emit(&self, event: &TranscriptEvent) -> Result<()> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}
