//! Snapshot-to-snapshot text diffing with word-boundary repair
//!
//! The caption surface re-renders the entire current line on every change, so
//! consecutive snapshots mostly share a long common prefix. The interesting
//! cases are cuts that land mid-word: the engine first renders a truncated
//! word ("wor"), then completes it ("world") in the next snapshot.

use tracing::debug;

use super::text::{common_prefix_len, is_letter, trailing_letter_run_start};

/// Compute the text that is new in `new_text` relative to `old_text`.
///
/// Returns the appended suffix in the common case. When the cut between the
/// shared prefix and the new content splits a word, the completed word is
/// reconstructed from `new_text` and returned instead of the raw suffix,
/// prefixed with a separating space. A snapshot sharing no prefix with the
/// previous one is returned whole: it is a full replacement, and the caller
/// decides what that means based on timing.
pub fn diff_snapshots(old_text: &str, new_text: &str) -> String {
    if old_text.is_empty() {
        return new_text.to_string();
    }
    if new_text.is_empty() {
        return String::new();
    }

    let prefix = common_prefix_len(old_text, new_text);
    if prefix == 0 {
        debug!("no common prefix, treating snapshot as full replacement");
        return new_text.to_string();
    }

    let candidate = &new_text[prefix..];
    if candidate.is_empty() {
        // The snapshot shrank to a prefix of the old text; nothing new
        return String::new();
    }

    let last_shared = old_text[..prefix].chars().next_back();
    let first_new = candidate.chars().next();
    if let (Some(before), Some(after)) = (last_shared, first_new) {
        if is_letter(before) && is_letter(after) {
            if let Some(word) = repair_split_word(old_text, new_text, prefix) {
                debug!(word = %word, "repaired word split across snapshots");
                return format!(" {}", word);
            }
        }
    }

    candidate.to_string()
}

/// Reconstruct a word that the cut at byte offset `prefix` split in two.
///
/// Walks back through the shared prefix to the start of the truncated word
/// and forward through the new content while letters (or an embedded stray
/// period) continue, then reads the completed word out of `new_text`.
fn repair_split_word(old_text: &str, new_text: &str, prefix: usize) -> Option<String> {
    let word_start = trailing_letter_run_start(&new_text[..prefix]);

    let mut word_end = prefix;
    for (i, c) in new_text[prefix..].char_indices() {
        if !is_letter(c) && c != '.' {
            break;
        }
        word_end = prefix + i + c.len_utf8();
    }

    let rebuilt = &new_text[word_start..word_end];
    let truncated = &old_text[word_start..prefix];
    if rebuilt != truncated && rebuilt.contains(truncated) {
        Some(rebuilt.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_from_empty() {
        assert_eq!(diff_snapshots("", "Hello there"), "Hello there");
    }

    #[test]
    fn test_diff_pure_append() {
        // Boundary between old and appended text is not letter-to-letter,
        // so the suffix comes back verbatim
        assert_eq!(diff_snapshots("Hello", "Hello world"), " world");
        assert_eq!(diff_snapshots("Hello.", "Hello. Next up"), " Next up");
    }

    #[test]
    fn test_diff_pure_append_property() {
        // diff(A, A + C) == C whenever the A/C boundary does not land
        // mid-word
        let cases = [
            ("Hello", " world"),
            ("", "anything"),
            ("a.", "b"),
            ("одно", " слово"),
            ("trailing ", "word"),
        ];
        for (a, c) in cases {
            assert_eq!(diff_snapshots(a, &format!("{}{}", a, c)), c);
        }
    }

    #[test]
    fn test_diff_word_split_repair() {
        // "wor" was rendered truncated, then completed to "world"
        assert_eq!(diff_snapshots("Hello wor", "Hello world"), " world");
    }

    #[test]
    fn test_diff_word_split_repair_keeps_embedded_period() {
        // Stray periods inside the completed run survive the repair; the
        // corrector removes them later
        assert_eq!(diff_snapshots("say exam", "say examp.le"), " examp.le");
    }

    #[test]
    fn test_diff_word_split_repair_cyrillic() {
        assert_eq!(diff_snapshots("при", "привет"), " привет");
    }

    #[test]
    fn test_diff_full_discontinuity() {
        // No shared prefix: the whole snapshot is the diff
        assert_eq!(diff_snapshots("Hello world", "Next topic"), "Next topic");
    }

    #[test]
    fn test_diff_shrunk_snapshot() {
        assert_eq!(diff_snapshots("Hello world", "Hello"), "");
        assert_eq!(diff_snapshots("Hello world", ""), "");
    }

    #[test]
    fn test_diff_mid_text_correction() {
        // The shared prefix ends inside a word both times; the completed word
        // is read out of the new snapshot
        assert_eq!(diff_snapshots("the ca", "the cart"), " cart");
        assert_eq!(diff_snapshots("the cat", "the car"), " car");
    }
}
