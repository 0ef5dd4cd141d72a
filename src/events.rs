use serde::{Deserialize, Serialize};

/// One observed full-text state of the caption surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Full caption text as currently rendered
    pub text: String,

    /// Monotonic timestamp in milliseconds since session start
    pub observed_at_ms: u64,
}

/// A finalized, time-bounded span of text treated as one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phrase {
    /// Corrected phrase text
    pub text: String,

    /// When the phrase started, milliseconds since session start
    pub start_ms: u64,

    /// When the last snapshot contributing to the phrase arrived
    pub end_ms: u64,

    /// Number of whitespace-delimited words in `text`
    pub word_count: usize,

    /// `end_ms - start_ms`, in seconds
    pub duration_secs: f64,
}

/// Event emitted by the segmenter and delivered to the output sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranscriptEvent {
    /// A new phrase opened
    PhraseStart { text: String, at_ms: u64 },

    /// The open phrase grew or was corrected; carries the full current text,
    /// not a delta
    PhraseUpdate { text: String, at_ms: u64 },

    /// The open phrase closed
    PhraseEnd { phrase: Phrase },
}

impl TranscriptEvent {
    /// Text carried by the event, whatever its kind
    pub fn text(&self) -> &str {
        match self {
            TranscriptEvent::PhraseStart { text, .. } => text,
            TranscriptEvent::PhraseUpdate { text, .. } => text,
            TranscriptEvent::PhraseEnd { phrase } => &phrase.text,
        }
    }
}
