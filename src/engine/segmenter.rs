//! Session state machine turning snapshots into transcript events
//!
//! One segmenter per caption session. Each snapshot is diffed against the
//! last absorbed one, cleaned, and either merged into the open phrase or
//! treated as the start of a new one, depending on how much time has passed
//! relative to the adaptive threshold. State lives entirely in this struct;
//! independent sessions never share anything.

use std::collections::VecDeque;

use tracing::debug;

use super::cleaner::clean_diff;
use super::config::EngineConfig;
use super::corrector::correct_phrase;
use super::diff::diff_snapshots;
use super::overlap::merge_overlapping;
use super::text::trailing_letter_run_start;
use super::threshold::next_phrase_threshold;
use crate::events::{Phrase, TranscriptEvent};

/// Incremental phrase segmenter over a stream of caption snapshots
pub struct PhraseSegmenter {
    config: EngineConfig,

    /// Last full snapshot absorbed, never a merge of several
    full_text: String,

    /// When `full_text` was set, milliseconds since session start
    last_update_ms: u64,

    /// Accumulating open phrase; empty when no phrase is open
    current_phrase: String,

    /// When the open phrase started
    phrase_start_ms: u64,

    /// At most one pending merged-word fragment awaiting substitution into
    /// the tail of the open phrase; cleared at every phrase boundary
    word_buffer: String,

    /// Finalized phrases, oldest first, bounded by `config.history_capacity`
    history: VecDeque<Phrase>,

    total_words: u64,
    total_secs: f64,
    avg_words_per_sec: f64,
}

impl PhraseSegmenter {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            full_text: String::new(),
            last_update_ms: 0,
            current_phrase: String::new(),
            phrase_start_ms: 0,
            word_buffer: String::new(),
            history: VecDeque::new(),
            total_words: 0,
            total_secs: 0.0,
            avg_words_per_sec: 0.0,
        }
    }

    /// Absorb one snapshot and return the events it produced.
    ///
    /// This is the single serialized entry point of the engine: every
    /// dependent mutation of session state happens here, and each accepted
    /// snapshot runs to completion before the next is looked at.
    pub fn on_snapshot(&mut self, text: &str, at_ms: u64) -> Vec<TranscriptEvent> {
        if text == self.full_text {
            // Duplicate snapshot, nothing to absorb
            return Vec::new();
        }

        let delta_secs = at_ms.saturating_sub(self.last_update_ms) as f64 / 1000.0;
        let diff = diff_snapshots(&self.full_text, text);
        let outcome = clean_diff(&diff, &self.current_phrase);
        if let Some(word) = outcome.merged_word {
            self.word_buffer = word;
        }
        let cleaned = outcome.text;

        if self.is_noise(&cleaned) && self.word_buffer.is_empty() {
            // Nothing worth emitting, but absorb the snapshot so the same
            // bytes are not re-diffed on the next update
            self.absorb(text, at_ms);
            return Vec::new();
        }

        let threshold = next_phrase_threshold(&self.config, &self.history, self.avg_words_per_sec);
        let is_new_phrase = delta_secs >= threshold;
        debug!(
            delta_secs,
            threshold,
            is_new_phrase,
            cleaned = %cleaned,
            "absorbed snapshot"
        );

        let mut events = Vec::new();
        if is_new_phrase {
            if !self.current_phrase.is_empty() {
                events.push(self.finalize_open_phrase());
            }
            self.word_buffer.clear();
            self.open_phrase(&cleaned, at_ms, &mut events);
        } else if !self.current_phrase.is_empty() {
            self.flush_word_buffer();
            if !cleaned.trim().is_empty() {
                self.current_phrase = merge_overlapping(&self.current_phrase, &cleaned);
            }
            self.current_phrase = correct_phrase(&self.current_phrase);
            events.push(TranscriptEvent::PhraseUpdate {
                text: self.current_phrase.clone(),
                at_ms,
            });
        } else {
            self.open_phrase(&cleaned, at_ms, &mut events);
        }

        self.absorb(text, at_ms);
        events
    }

    /// Finalize the open phrase without starting a new one.
    ///
    /// Called at session end so the last utterance is not lost; a pending
    /// word fragment joins the phrase before it closes.
    pub fn flush(&mut self) -> Vec<TranscriptEvent> {
        if self.current_phrase.is_empty() {
            return Vec::new();
        }
        self.flush_word_buffer();
        vec![self.finalize_open_phrase()]
    }

    /// Text of the open phrase, empty when none is open
    pub fn current_phrase(&self) -> &str {
        &self.current_phrase
    }

    /// Finalized phrases, oldest first
    pub fn phrases(&self) -> &VecDeque<Phrase> {
        &self.history
    }

    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    /// Observed speech rate in words per second; 0 until enough phrases have
    /// been finalized to measure one
    pub fn avg_words_per_sec(&self) -> f64 {
        self.avg_words_per_sec
    }

    fn absorb(&mut self, text: &str, at_ms: u64) {
        self.full_text.clear();
        self.full_text.push_str(text);
        self.last_update_ms = at_ms;
    }

    /// Whether a cleaned diff is too small to carry new speech
    fn is_noise(&self, cleaned: &str) -> bool {
        cleaned.trim().chars().count() < self.config.min_diff_length
    }

    fn open_phrase(&mut self, cleaned: &str, at_ms: u64, events: &mut Vec<TranscriptEvent>) {
        let text = correct_phrase(cleaned);
        if text.is_empty() {
            // Nothing survived correction; stay without an open phrase so the
            // open-iff-non-empty invariant holds
            return;
        }
        self.current_phrase = text;
        self.phrase_start_ms = at_ms;
        events.push(TranscriptEvent::PhraseStart {
            text: self.current_phrase.clone(),
            at_ms,
        });
    }

    /// Substitute the pending merged word for the trailing letter-run of the
    /// open phrase
    fn flush_word_buffer(&mut self) {
        if self.word_buffer.is_empty() {
            return;
        }
        let tail_start = trailing_letter_run_start(&self.current_phrase);
        self.current_phrase.truncate(tail_start);
        self.current_phrase.push_str(&self.word_buffer);
        self.word_buffer.clear();
    }

    fn finalize_open_phrase(&mut self) -> TranscriptEvent {
        let text = correct_phrase(&self.current_phrase);
        let start_ms = self.phrase_start_ms;
        let end_ms = self.last_update_ms;
        let duration_secs = end_ms.saturating_sub(start_ms) as f64 / 1000.0;
        let word_count = text.split_whitespace().count();

        self.total_words += word_count as u64;
        self.total_secs += duration_secs;
        if self.total_secs > 0.0 {
            self.avg_words_per_sec = self.total_words as f64 / self.total_secs;
        }

        let phrase = Phrase {
            text,
            start_ms,
            end_ms,
            word_count,
            duration_secs,
        };
        debug!(text = %phrase.text, duration_secs, "finalized phrase");

        self.history.push_back(phrase.clone());
        while self.history.len() > self.config.history_capacity {
            self.history.pop_front();
        }
        self.current_phrase.clear();

        TranscriptEvent::PhraseEnd { phrase }
    }
}
