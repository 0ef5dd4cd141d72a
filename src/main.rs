use anyhow::Result;
use clap::Parser;
use meet_captions::{
    Config, ConsoleSink, JsonlSink, OutputSink, SessionConfig, SnapshotSourceFactory, SourceKind,
    TranscriptionSession,
};
use std::sync::Arc;
use tracing::info;

/// Live caption cleanup: replays a caption script through the phrase
/// segmentation engine and renders the resulting transcript
#[derive(Debug, Parser)]
#[command(name = "meet-captions", version)]
struct Args {
    /// Path to a config file
    #[arg(long)]
    config: Option<String>,

    /// Caption script to replay: lines of `<offset_ms><TAB><text>`.
    /// Runs the built-in demo script when omitted.
    #[arg(long)]
    script: Option<String>,

    /// Replay honoring recorded timing instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Append transcript events to this file as JSON lines instead of
    /// rendering to the terminal
    #[arg(long)]
    jsonl: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut session_config = SessionConfig::default();
    let mut jsonl_path = args.jsonl;
    if let Some(path) = &args.config {
        let cfg = Config::load(path)?;
        info!("Loaded config: {}", cfg.service.name);
        session_config.engine = cfg.engine;
        if jsonl_path.is_none() {
            jsonl_path = cfg.output.jsonl_path;
        }
    }

    let kind = match &args.script {
        Some(path) => SourceKind::Script {
            path: path.clone(),
            realtime: args.realtime,
        },
        None => SourceKind::Demo,
    };
    let source = SnapshotSourceFactory::create(kind)?;

    let sink: Arc<dyn OutputSink> = match &jsonl_path {
        Some(path) => Arc::new(JsonlSink::open(path).await?),
        None => Arc::new(ConsoleSink::new()),
    };

    // Scripted replays deliver every snapshot; coalescing is for live sources
    session_config.coalesce_backlog = false;

    let session = TranscriptionSession::new(session_config, sink);
    session.start(source).await?;
    session.join().await?;
    let stats = session.stop().await?;

    info!(
        "Session finished: {} snapshots, {} phrases, {} words ({:.2} words/sec)",
        stats.snapshots_processed, stats.phrases_finalized, stats.total_words,
        stats.avg_words_per_sec
    );

    Ok(())
}
