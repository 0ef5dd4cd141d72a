//! Overlap-aware splicing of an open phrase and a new fragment
//!
//! The caption engine restates content around a re-render boundary, so the
//! head of a new fragment often repeats the tail of the phrase it extends.
//! Splicing on the longest such overlap avoids duplicating the restated run.

/// Append `fragment` to `tail`, dropping the longest head of `fragment`
/// that `tail` already ends with.
///
/// When no overlap exists the two are joined with a single space.
pub fn merge_overlapping(tail: &str, fragment: &str) -> String {
    let max = tail.len().min(fragment.len());

    let mut boundaries: Vec<usize> = fragment
        .char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .collect();
    boundaries.push(fragment.len());

    for k in boundaries.into_iter().rev() {
        if k > max {
            continue;
        }
        if tail.ends_with(&fragment[..k]) {
            return format!("{}{}", tail, &fragment[k..]);
        }
    }

    format!("{} {}", tail, fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_partial_overlap() {
        assert_eq!(merge_overlapping("hello wor", "world now"), "hello world now");
    }

    #[test]
    fn test_merge_no_overlap() {
        assert_eq!(merge_overlapping("hello", "there"), "hello there");
    }

    #[test]
    fn test_merge_full_restatement() {
        // The fragment is entirely contained in the tail
        assert_eq!(merge_overlapping("one two three", "three"), "one two three");
    }

    #[test]
    fn test_merge_prefers_longest_overlap() {
        // "aba" overlaps on "a" and on "aba"; the longer match wins
        assert_eq!(merge_overlapping("xaba", "abab"), "xabab");
    }

    #[test]
    fn test_merge_with_leading_space_fragment() {
        assert_eq!(merge_overlapping("Hello wor", " world"), "Hello world");
    }

    #[test]
    fn test_merge_multibyte() {
        assert_eq!(merge_overlapping("добрый ве", "вечер"), "добрый вечер");
    }
}
