//! Incremental caption segmentation engine
//!
//! This module turns successive full-text caption snapshots into a stream of
//! transcript events:
//! - Diffing against the last absorbed snapshot, with word-boundary repair
//! - Duplicate suppression (restated trigrams, split-word fragments)
//! - Idempotent punctuation/spacing correction
//! - Adaptive phrase-boundary timing derived from observed speech rate
//! - A session state machine deciding continuation vs. new phrase

pub mod cleaner;
pub mod config;
pub mod corrector;
pub mod diff;
pub mod overlap;
pub mod segmenter;
pub mod threshold;

mod text;

pub use cleaner::{clean_diff, CleanOutcome};
pub use config::EngineConfig;
pub use corrector::correct_phrase;
pub use diff::diff_snapshots;
pub use overlap::merge_overlapping;
pub use segmenter::PhraseSegmenter;
pub use threshold::next_phrase_threshold;
