//! Output sinks: where transcript events go
//!
//! The engine emits an ordered stream of `TranscriptEvent`s; a sink renders
//! or records them. Sinks included here:
//! - `ConsoleSink`: live terminal rendering (updates overwrite in place)
//! - `JsonlSink`: one timestamped JSON event per line, appended to a file
//! - `MemorySink`: collects events in memory, for tests and embedding

pub mod console;
pub mod jsonl;
pub mod memory;

use anyhow::Result;

use crate::events::TranscriptEvent;

pub use console::ConsoleSink;
pub use jsonl::JsonlSink;
pub use memory::MemorySink;

/// Consumer of transcript events
#[async_trait::async_trait]
pub trait OutputSink: Send + Sync {
    /// Deliver one event; events arrive in emission order
    async fn emit(&self, event: &TranscriptEvent) -> Result<()>;
}
