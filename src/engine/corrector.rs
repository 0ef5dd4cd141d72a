//! Idempotent phrase text normalization
//!
//! Repairs rendering artifacts the caption engine leaves behind: stray
//! periods inserted mid-word, missing spaces after punctuation, whitespace
//! drift from repeated re-renders. Applied to every phrase before it is
//! emitted or stored, and safe to apply again to already-corrected text.

use super::text::is_letter;

const SENTENCE_PUNCTUATION: &[char] = &[',', '.', '!', '?', ';', ':'];

/// Normalize punctuation and spacing artifacts in `text`.
///
/// `correct_phrase(correct_phrase(x)) == correct_phrase(x)` for all `x`.
pub fn correct_phrase(text: &str) -> String {
    let mut s = remove_intraword_periods(text);
    s = space_after_punctuation(&s);
    s = strip_space_before_punctuation(&s);
    s = collapse_period_space_period(&s);
    s = collapse_whitespace_runs(&s);
    s.trim().to_string()
}

/// Remove a period sitting strictly between two letters: "wor.d" -> "word".
///
/// The scan tracks the last character already kept, so chains like "a.b.c"
/// resolve in one pass.
fn remove_intraword_periods(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '.' {
            let prev_is_letter = out.chars().next_back().is_some_and(is_letter);
            let next_is_letter = chars.peek().copied().is_some_and(is_letter);
            if prev_is_letter && next_is_letter {
                continue;
            }
        }
        out.push(c);
    }

    out
}

/// Insert a single space after sentence punctuation followed directly by an
/// alphanumeric character: "one,two" -> "one, two"
fn space_after_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        out.push(c);
        if SENTENCE_PUNCTUATION.contains(&c)
            && chars.peek().copied().is_some_and(char::is_alphanumeric)
        {
            out.push(' ');
        }
    }

    out
}

/// Remove whitespace immediately preceding sentence punctuation:
/// "word ." -> "word."
fn strip_space_before_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        if SENTENCE_PUNCTUATION.contains(&c) {
            while out.chars().next_back().is_some_and(char::is_whitespace) {
                out.pop();
            }
        }
        out.push(c);
    }

    out
}

/// Collapse "period, space, period" into a single period
fn collapse_period_space_period(text: &str) -> String {
    let mut s = text.to_string();
    while s.contains(". .") {
        s = s.replace(". .", ".");
    }
    s
}

/// Collapse runs of 2+ whitespace characters into a single space
fn collapse_whitespace_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() && chars.peek().copied().is_some_and(char::is_whitespace) {
            while chars.peek().copied().is_some_and(char::is_whitespace) {
                chars.next();
            }
            out.push(' ');
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_stray_period_inside_word() {
        assert_eq!(correct_phrase("wor.d"), "word");
        assert_eq!(correct_phrase("a.b.c"), "abc");
    }

    #[test]
    fn test_keeps_sentence_period() {
        assert_eq!(correct_phrase("Done. Next"), "Done. Next");
        assert_eq!(correct_phrase("Done."), "Done.");
    }

    #[test]
    fn test_inserts_space_after_punctuation() {
        assert_eq!(correct_phrase("one,two"), "one, two");
        assert_eq!(correct_phrase("stop!go"), "stop! go");
    }

    #[test]
    fn test_strips_space_before_punctuation() {
        assert_eq!(correct_phrase("word ."), "word.");
        assert_eq!(correct_phrase("wait , here"), "wait, here");
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(correct_phrase("too   many  spaces"), "too many spaces");
        assert_eq!(correct_phrase("tab\t\tbreak"), "tab break");
    }

    #[test]
    fn test_trims() {
        assert_eq!(correct_phrase("  padded out  "), "padded out");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "wor.d here",
            "one,two .  three",
            "  a.b,c!d  ",
            "плох.ой пример , да",
            "already clean text.",
            ". . .",
            "",
        ];
        for s in samples {
            let once = correct_phrase(s);
            assert_eq!(correct_phrase(&once), once, "not idempotent for {:?}", s);
        }
    }
}
