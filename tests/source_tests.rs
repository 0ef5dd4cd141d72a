// Integration tests for snapshot sources

use meet_captions::{
    PushSource, ScriptSource, SnapshotSource, SnapshotSourceFactory, SourceKind,
};
use std::io::Write;

#[tokio::test]
async fn test_script_source_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("captions.tsv");
    {
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "# recorded standup captions").unwrap();
        writeln!(f, "0\tHello").unwrap();
        writeln!(f, "250\tHello everyone").unwrap();
        writeln!(f, "4000\tNew topic").unwrap();
    }

    let mut source = ScriptSource::from_file(path.to_str().unwrap(), false).unwrap();
    let mut rx = source.start().await.unwrap();

    let mut received = Vec::new();
    while let Some(snapshot) = rx.recv().await {
        received.push(snapshot);
    }

    assert_eq!(received.len(), 3);
    assert_eq!(received[0].text, "Hello");
    assert_eq!(received[1].observed_at_ms, 250);
    assert_eq!(received[2].text, "New topic");
    assert!(!source.is_active());
}

#[tokio::test]
async fn test_script_source_missing_file() {
    assert!(ScriptSource::from_file("/nonexistent/captions.tsv", false).is_err());
}

#[tokio::test]
async fn test_script_source_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.tsv");
    std::fs::write(&path, "not a valid line\n").unwrap();

    assert!(ScriptSource::from_file(path.to_str().unwrap(), false).is_err());
}

#[tokio::test]
async fn test_push_source_forwards_snapshots() {
    let (mut source, injector) = PushSource::new(4);
    let mut rx = source.start().await.unwrap();
    assert!(source.is_active());

    injector.push("first", 0).await.unwrap();
    injector.push("second", 100).await.unwrap();

    assert_eq!(rx.recv().await.unwrap().text, "first");
    assert_eq!(rx.recv().await.unwrap().observed_at_ms, 100);
}

#[tokio::test]
async fn test_push_source_cannot_start_twice() {
    let (mut source, _injector) = PushSource::new(4);
    source.start().await.unwrap();

    assert!(source.start().await.is_err());
}

#[tokio::test]
async fn test_factory_creates_demo_source() {
    let mut source = SnapshotSourceFactory::create(SourceKind::Demo).unwrap();
    assert_eq!(source.name(), "script");
    assert!(!source.is_active());

    // The demo script paces itself; just confirm it starts and produces
    let mut rx = source.start().await.unwrap();
    let first = rx.recv().await.unwrap();
    assert!(!first.text.is_empty());
    source.stop().await.unwrap();
}
