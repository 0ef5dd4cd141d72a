//! Adaptive phrase-boundary timing
//!
//! How long a gap between snapshots must be before it counts as a phrase
//! boundary rather than a pause within one. Early in a session the base
//! threshold applies; once enough phrases have been observed, the threshold
//! adapts to the speaker's measured rate. A given silence is proportionally
//! longer for a fast speaker, so their threshold drops; slow speakers get a
//! higher one so natural mid-phrase pauses don't split utterances.

use std::collections::VecDeque;

use super::config::EngineConfig;
use crate::events::Phrase;

/// Finalized phrases considered when averaging recent phrase length
const RECENT_PHRASE_WINDOW: usize = 5;

/// Phrase history needed before the threshold starts adapting
const MIN_HISTORY_FOR_ADAPTATION: usize = 3;

/// Seconds that must elapse since the last snapshot before the next one
/// starts a new phrase.
pub fn next_phrase_threshold(
    config: &EngineConfig,
    history: &VecDeque<Phrase>,
    avg_words_per_sec: f64,
) -> f64 {
    if history.len() < MIN_HISTORY_FOR_ADAPTATION {
        return config.base_threshold_secs;
    }

    let recent = history.len().min(RECENT_PHRASE_WINDOW);
    let total_words: usize = history
        .iter()
        .rev()
        .take(recent)
        .map(|p| p.word_count)
        .sum();
    let avg_phrase_len = total_words as f64 / recent as f64;

    if avg_words_per_sec <= 0.0 {
        // No reliable rate yet: shorter phrases imply a larger relative
        // threshold, longer phrases a smaller one
        let (lo, hi) = config.bootstrap_threshold_range;
        (15.0 / avg_phrase_len).clamp(lo, hi)
    } else {
        let (lo, hi) = config.steady_threshold_range;
        let scale = config.words_per_sec_reference / avg_words_per_sec;
        (config.base_threshold_secs * scale).clamp(lo, hi)
    }
}
