use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about a transcription session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Whether the session is currently consuming snapshots
    pub is_running: bool,

    /// When the session started
    pub started_at: DateTime<Utc>,

    /// Total duration in seconds
    pub duration_secs: f64,

    /// Number of snapshots absorbed so far
    pub snapshots_processed: usize,

    /// Number of phrases finalized so far
    pub phrases_finalized: usize,

    /// Total words across finalized phrases
    pub total_words: u64,

    /// Observed speech rate in words per second, 0 until measurable
    pub avg_words_per_sec: f64,
}
