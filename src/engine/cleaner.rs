//! Duplicate and word-boundary cleanup for raw snapshot diffs
//!
//! Two artifacts of the caption renderer are handled here:
//! - A word split around a stray period across the open phrase and the diff
//!   ("exam" + "p.le"), merged into a pending word buffer for the segmenter
//!   to substitute into the phrase tail
//! - Short runs the engine emits once and then restates inside the same diff,
//!   detected as repeated trigrams and dropped at their first occurrence

use tracing::debug;

use super::text::{is_letter, leading_word_run_end, trailing_letter_run_start};

/// Result of cleaning one diff against the current open phrase
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutcome {
    /// Diff text with consumed fragments and restated trigrams removed
    pub text: String,

    /// Completed word to substitute for the trailing letter-run of the open
    /// phrase, when the diff turned out to continue a split word
    pub merged_word: Option<String>,
}

/// Clean `diff` in the context of the open phrase it would extend.
pub fn clean_diff(diff: &str, open_phrase: &str) -> CleanOutcome {
    let (rest, merged_word) = merge_word_continuation(diff, open_phrase);
    CleanOutcome {
        text: suppress_repeated_trigrams(rest),
        merged_word,
    }
}

/// Detect a word split around a stray period between the open phrase tail and
/// the head of the diff.
///
/// Returns the diff with the consumed head stripped, and the merged word
/// (stray period removed) when the split pattern matched.
fn merge_word_continuation<'a>(diff: &'a str, open_phrase: &str) -> (&'a str, Option<String>) {
    let starts_with_letter = diff.chars().next().is_some_and(is_letter);
    let ends_with_letter = open_phrase.chars().next_back().is_some_and(is_letter);
    if !starts_with_letter || !ends_with_letter {
        return (diff, None);
    }

    let last_word = &open_phrase[trailing_letter_run_start(open_phrase)..];
    let head_end = leading_word_run_end(diff);
    let first_token = &diff[..head_end];

    let combined = format!("{}{}", last_word, first_token);
    if !is_period_split_word(&combined) {
        return (diff, None);
    }

    debug!(merged = %combined, "merged split-word fragment into pending buffer");
    (&diff[head_end..], Some(combined.replace('.', "")))
}

/// Whether `s` is letters + exactly one interior period + letters
fn is_period_split_word(s: &str) -> bool {
    let periods = s.chars().filter(|&c| c == '.').count();
    if periods != 1 {
        return false;
    }
    if s.starts_with('.') || s.ends_with('.') {
        return false;
    }
    s.chars().all(|c| is_letter(c) || c == '.')
}

/// Drop 3-token windows that reappear later in the same diff.
///
/// The renderer restates short runs it is about to re-emit more completely;
/// the first occurrence is the one to drop. Diffs of 3 tokens or fewer are
/// returned verbatim, spacing included: too short to detect repetition.
fn suppress_repeated_trigrams(diff: &str) -> String {
    let words: Vec<&str> = diff.split_whitespace().collect();
    if words.len() <= 3 {
        return diff.to_string();
    }

    let mut kept: Vec<&str> = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        if i + 3 <= words.len() {
            let window = words[i..i + 3].join(" ");
            let remaining = words[i + 3..].join(" ");
            if remaining.contains(&window) {
                debug!(window = %window, "dropped restated trigram");
                i += 3;
                continue;
            }
        }
        kept.push(words[i]);
        i += 1;
    }

    kept.join(" ")
}
