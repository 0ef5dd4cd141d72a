//! JSON-lines transcript export
//!
//! Appends one wall-clock-stamped JSON object per event. The engine itself
//! keeps no state across restarts; this file is the sink's own record, not
//! engine state.

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;

use super::OutputSink;
use crate::events::TranscriptEvent;

pub struct JsonlSink {
    file: Mutex<File>,
    path: String,
}

#[derive(Serialize)]
struct JsonlRecord<'a> {
    /// Wall-clock time the event was written, RFC3339
    timestamp: String,
    #[serde(flatten)]
    event: &'a TranscriptEvent,
}

impl JsonlSink {
    /// Open `path` for appending, creating it if missing
    pub async fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("Failed to open transcript file {}", path))?;

        info!("Writing transcript events to {}", path);

        Ok(Self {
            file: Mutex::new(file),
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait::async_trait]
impl OutputSink for JsonlSink {
    async fn emit(&self, event: &TranscriptEvent) -> Result<()> {
        let record = JsonlRecord {
            timestamp: chrono::Utc::now().to_rfc3339(),
            event,
        };
        let mut line = serde_json::to_string(&record).context("Failed to encode event")?;
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes())
            .await
            .with_context(|| format!("Failed to append to {}", self.path))?;
        file.flush().await?;
        Ok(())
    }
}
