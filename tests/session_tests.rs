// Integration tests for the transcription session
//
// These run real sources through a session and verify the event stream
// arriving at the sink, plus session statistics and transcript retrieval.

use meet_captions::{
    MemorySink, PushSource, ScriptSource, SessionConfig, Snapshot, TranscriptEvent,
    TranscriptionSession,
};
use std::sync::Arc;
use std::time::Duration;

fn snapshot(text: &str, at_ms: u64) -> Snapshot {
    Snapshot {
        text: text.to_string(),
        observed_at_ms: at_ms,
    }
}

fn exact_replay_config() -> SessionConfig {
    SessionConfig {
        coalesce_backlog: false,
        ..SessionConfig::default()
    }
}

#[tokio::test]
async fn test_scripted_session_delivers_events() {
    let entries = vec![
        snapshot("Hello", 0),
        snapshot("Hello wor", 300),
        snapshot("Hello world", 600),
        snapshot("Next", 3700),
    ];
    let source = ScriptSource::from_entries(entries, false);
    let sink = Arc::new(MemorySink::new());

    let session = TranscriptionSession::new(exact_replay_config(), sink.clone());
    session.start(Box::new(source)).await.unwrap();
    session.join().await.unwrap();
    let stats = session.stop().await.unwrap();

    let events = sink.events().await;
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e {
            TranscriptEvent::PhraseStart { .. } => "start",
            TranscriptEvent::PhraseUpdate { .. } => "update",
            TranscriptEvent::PhraseEnd { .. } => "end",
        })
        .collect();

    // Closing the session flushes the still-open "Next" phrase
    assert_eq!(kinds, vec!["start", "update", "update", "end", "start", "end"]);
    assert_eq!(events[3].text(), "Hello world");
    assert_eq!(events[5].text(), "Next");

    assert!(!stats.is_running);
    assert_eq!(stats.snapshots_processed, 4);
    assert_eq!(stats.phrases_finalized, 2);
    assert_eq!(stats.total_words, 3);
}

#[tokio::test]
async fn test_transcript_retrieval() {
    let entries = vec![
        snapshot("first phrase here", 0),
        snapshot("second phrase here", 10_000),
        snapshot("third phrase here", 20_000),
    ];
    let source = ScriptSource::from_entries(entries, false);
    let sink = Arc::new(MemorySink::new());

    let session = TranscriptionSession::new(exact_replay_config(), sink);
    session.start(Box::new(source)).await.unwrap();
    session.join().await.unwrap();
    session.stop().await.unwrap();

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[0].text, "first phrase here");
    assert_eq!(transcript[2].text, "third phrase here");
}

#[tokio::test]
async fn test_push_source_session() {
    let (source, injector) = PushSource::new(16);
    let sink = Arc::new(MemorySink::new());

    let session = TranscriptionSession::new(exact_replay_config(), sink.clone());
    session.start(Box::new(source)).await.unwrap();

    injector.push("Good morning", 0).await.unwrap();
    injector.push("Good morning everyone", 400).await.unwrap();

    // Wait for both snapshots to be absorbed before stopping
    for _ in 0..100 {
        if session.stats().await.snapshots_processed == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let stats = session.stop().await.unwrap();
    assert_eq!(stats.snapshots_processed, 2);

    let events = sink.events().await;
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[1],
        TranscriptEvent::PhraseUpdate {
            text: "Good morning everyone".to_string(),
            at_ms: 400
        }
    );
    assert!(matches!(events[2], TranscriptEvent::PhraseEnd { .. }));
}

#[tokio::test]
async fn test_duplicate_snapshots_produce_no_extra_events() {
    let entries = vec![
        snapshot("same text", 0),
        snapshot("same text", 200),
        snapshot("same text", 400),
    ];
    let source = ScriptSource::from_entries(entries, false);
    let sink = Arc::new(MemorySink::new());

    let session = TranscriptionSession::new(exact_replay_config(), sink.clone());
    session.start(Box::new(source)).await.unwrap();
    session.join().await.unwrap();
    session.stop().await.unwrap();

    let events = sink.events().await;
    // One start for the first snapshot, one end from the closing flush
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn test_stop_without_start_reports_idle_stats() {
    let sink = Arc::new(MemorySink::new());
    let session = TranscriptionSession::new(SessionConfig::default(), sink);

    let stats = session.stop().await.unwrap();
    assert!(!stats.is_running);
    assert_eq!(stats.snapshots_processed, 0);
    assert_eq!(stats.phrases_finalized, 0);
}
