pub mod config;
pub mod engine;
pub mod events;
pub mod session;
pub mod sink;
pub mod source;

pub use config::Config;
pub use engine::{
    clean_diff, correct_phrase, diff_snapshots, merge_overlapping, next_phrase_threshold,
    CleanOutcome, EngineConfig, PhraseSegmenter,
};
pub use events::{Phrase, Snapshot, TranscriptEvent};
pub use session::{SessionConfig, SessionStats, TranscriptionSession};
pub use sink::{ConsoleSink, JsonlSink, MemorySink, OutputSink};
pub use source::{
    PushSource, ScriptSource, SnapshotInjector, SnapshotSource, SnapshotSourceFactory, SourceKind,
};
