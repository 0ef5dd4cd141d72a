//! Transcription session management
//!
//! This module provides the `TranscriptionSession` abstraction that manages:
//! - Consuming snapshots from a `SnapshotSource`
//! - Serializing them through the phrase segmentation engine
//! - Coalescing bursts to the most recent pending snapshot
//! - Delivering transcript events to an `OutputSink`
//! - Session statistics and transcript retrieval

mod config;
mod session;
mod stats;

pub use config::SessionConfig;
pub use session::TranscriptionSession;
pub use stats::SessionStats;
