use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;

/// Configuration for a transcription session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "captions-2026-08-06-standup")
    pub session_id: String,

    /// Segmentation engine tuning
    pub engine: EngineConfig,

    /// When snapshots arrive faster than they are processed, drop the backlog
    /// and keep only the newest: only the latest full text matters for
    /// diffing. Disable for exact replays.
    pub coalesce_backlog: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("captions-{}", uuid::Uuid::new_v4()),
            engine: EngineConfig::default(),
            coalesce_backlog: true,
        }
    }
}
