//! Edit-distance based string similarity
//!
//! Levenshtein distance over Unicode scalar values, plus a normalized,
//! case-insensitive similarity in the `[0, 1]` range used by the scorer.

use unicode_normalization::UnicodeNormalization;

/// Minimum number of single-character insertions, deletions and
/// substitutions needed to turn `a` into `b`.
///
/// Runs the classic dynamic program row by row; only the previous row is
/// kept alive, which yields the same cells as the full table.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Case-insensitive similarity: `1 - distance / max_len`.
///
/// Two empty strings are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize_for_matching(a);
    let b = normalize_for_matching(b);

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - distance(&a, &b) as f64 / max_len as f64
}

/// Whether `similarity(a, b)` reaches `threshold`
pub fn is_match(a: &str, b: &str, threshold: f64) -> bool {
    similarity(a, b) >= threshold
}

/// NFC composition followed by lowercasing
fn normalize_for_matching(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_fixtures() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("abc", "abc"), 0);
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
    }

    #[test]
    fn test_distance_against_empty() {
        assert_eq!(distance("", "dune"), 4);
        assert_eq!(distance("dune", ""), 4);
    }

    #[test]
    fn test_distance_is_case_sensitive() {
        // Only similarity() folds case
        assert_eq!(distance("Dune", "dune"), 1);
    }

    #[test]
    fn test_distance_counts_code_points() {
        assert_eq!(distance("café", "cafe"), 1);
        assert_eq!(distance("日本語", "日本"), 1);
    }

    #[test]
    fn test_distance_long_strings() {
        let a = "a".repeat(400);
        let b = "b".repeat(300);
        assert_eq!(distance(&a, &b), 400);
    }

    #[test]
    fn test_similarity_identical_and_empty() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("habits", "habits"), 1.0);
        assert_eq!(similarity("", "abc"), 0.0);
    }

    #[test]
    fn test_similarity_case_insensitive() {
        assert_eq!(similarity("DUNE", "dune"), 1.0);
    }

    #[test]
    fn test_similarity_dune_prefix() {
        let sim = similarity("dun", "dune");
        assert!((sim - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_typo() {
        // One deletion out of nine characters
        let sim = similarity("pragmtic", "pragmatic");
        assert!(sim > 0.85 && sim < 0.9);
    }

    #[test]
    fn test_similarity_composed_and_decomposed() {
        let composed = "caf\u{e9}";
        let decomposed = "cafe\u{301}";
        assert_eq!(similarity(composed, decomposed), 1.0);
    }

    #[test]
    fn test_is_match_threshold_is_inclusive() {
        assert!(is_match("dun", "dune", 0.75));
        assert!(!is_match("dun", "dune", 0.76));
    }
}
