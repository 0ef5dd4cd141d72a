//! Snapshot sources: where caption text comes from
//!
//! The engine itself never watches a page or schedules polls; it consumes an
//! ordered, timestamped stream of full-text snapshots from a source behind
//! this trait. Sources included here:
//! - `ScriptSource`: replays a recorded caption script (file or in-memory)
//! - `PushSource`: lets an embedding application push snapshots in

pub mod push;
pub mod script;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::events::Snapshot;

pub use push::{PushSource, SnapshotInjector};
pub use script::ScriptSource;

/// Provider of caption snapshots
///
/// A source emits `Snapshot`s with monotonically increasing timestamps. No
/// duplicate suppression is expected upstream; the engine handles identical
/// consecutive snapshots itself. A source signals exhaustion (the caption
/// surface going away, a script ending) by closing the channel.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Start producing snapshots
    ///
    /// Returns a channel receiver that will receive snapshots in order
    async fn start(&mut self) -> Result<mpsc::Receiver<Snapshot>>;

    /// Stop producing snapshots
    async fn stop(&mut self) -> Result<()>;

    /// Check if the source is currently producing
    fn is_active(&self) -> bool;

    /// Get source name for logging
    fn name(&self) -> &str;
}

/// Snapshot source type
#[derive(Debug, Clone)]
pub enum SourceKind {
    /// Replay a caption script file (lines of `<offset_ms>\t<text>`)
    Script { path: String, realtime: bool },

    /// Built-in demo script (for trying the pipeline without a recording)
    Demo,
}

/// Snapshot source factory
pub struct SnapshotSourceFactory;

impl SnapshotSourceFactory {
    /// Create a snapshot source based on configuration
    pub fn create(kind: SourceKind) -> Result<Box<dyn SnapshotSource>> {
        match kind {
            SourceKind::Script { path, realtime } => {
                let source = ScriptSource::from_file(&path, realtime)?;
                Ok(Box::new(source))
            }
            SourceKind::Demo => Ok(Box::new(ScriptSource::demo())),
        }
    }
}
