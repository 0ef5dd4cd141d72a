//! Terminal rendering of the live transcript
//!
//! The open phrase is redrawn in place with a carriage return on every
//! update; a separator banner marks each new phrase, and a finalized phrase
//! gets its closing newline.

use anyhow::Result;
use std::io::Write;

use super::OutputSink;
use crate::events::TranscriptEvent;

const SEPARATOR: &str = "▃▃▃▃▃▃▃▃▃▃▃▃▃▃▃▃▃▃▃▃";

pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl OutputSink for ConsoleSink {
    async fn emit(&self, event: &TranscriptEvent) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        match event {
            TranscriptEvent::PhraseStart { text, .. } => {
                writeln!(stdout)?;
                writeln!(stdout, "{} NEW PHRASE {}", SEPARATOR, SEPARATOR)?;
                write!(stdout, "{}", text)?;
            }
            TranscriptEvent::PhraseUpdate { text, .. } => {
                write!(stdout, "\r{}", text)?;
            }
            TranscriptEvent::PhraseEnd { phrase } => {
                write!(stdout, "\r{}", phrase.text)?;
                writeln!(stdout)?;
            }
        }
        stdout.flush()?;
        Ok(())
    }
}
