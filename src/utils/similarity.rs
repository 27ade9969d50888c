//! Levenshtein based string similarity
//!
//! Used to suggest existing students when a participant name is typed in
//! slightly differently ("Kiss Ana" vs "Kiss Anna").

/// Minimum number of single-character insertions, deletions or substitutions
/// needed to turn `a` into `b`.
///
/// Works on Unicode scalar values and is case-sensitive.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // (|a|+1) x (|b|+1) table, row-major
    let width = b.len() + 1;
    let mut table = vec![0usize; (a.len() + 1) * width];

    for i in 0..=a.len() {
        table[i * width] = i;
    }
    for j in 0..=b.len() {
        table[j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let deletion = table[(i - 1) * width + j] + 1;
            let insertion = table[i * width + j - 1] + 1;
            let substitution = table[(i - 1) * width + j - 1] + cost;
            table[i * width + j] = deletion.min(insertion).min(substitution);
        }
    }

    table[a.len() * width + b.len()]
}

/// Case-insensitive similarity score in `[0, 1]`, where `1.0` means the
/// strings are equal after lowercasing.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - distance(&a, &b) as f64 / max_len as f64
}

/// Whether two strings are at least `threshold` similar.
///
/// Two empty strings are similar; an empty string is never similar to a
/// non-empty one. The threshold itself counts as similar.
pub fn is_similar(a: &str, b: &str, threshold: f64) -> bool {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => true,
        (true, false) | (false, true) => false,
        (false, false) => similarity(a, b) >= threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_SIMILARITY_THRESHOLD;

    #[test]
    fn test_distance_to_self_is_zero() {
        for s in ["", "a", "Kovács Péter", "kitten"] {
            assert_eq!(distance(s, s), 0);
        }
    }

    #[test]
    fn test_distance_against_empty() {
        assert_eq!(distance("", "sitting"), 7);
        assert_eq!(distance("kitten", ""), 6);
        assert_eq!(distance("", "Éva"), 3);
    }

    #[test]
    fn test_distance_classic_examples() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
        assert_eq!(distance("Anna", "Ana"), 1);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [("kitten", "sitting"), ("Nagy", "Nagyné"), ("abc", "")];
        for (a, b) in pairs {
            assert_eq!(distance(a, b), distance(b, a));
        }
    }

    #[test]
    fn test_distance_triangle_inequality() {
        let (a, b, c) = ("Szabó", "Szabo", "Sabo");
        assert!(distance(a, c) <= distance(a, b) + distance(b, c));
    }

    #[test]
    fn test_distance_is_case_sensitive() {
        assert_eq!(distance("Smith", "smith"), 1);
    }

    #[test]
    fn test_similarity_identical() {
        assert_eq!(similarity("Tóth Eszter", "Tóth Eszter"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_similarity_ignores_case() {
        assert_eq!(similarity("SMITH", "smith"), 1.0);
    }

    #[test]
    fn test_similarity_formula() {
        // one substitution over four characters
        assert_eq!(similarity("abcd", "abce"), 0.75);
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("", "abc"), 0.0);
    }

    #[test]
    fn test_is_similar_empty_inputs() {
        assert!(is_similar("", "", DEFAULT_SIMILARITY_THRESHOLD));
        assert!(!is_similar("", "a", DEFAULT_SIMILARITY_THRESHOLD));
        assert!(!is_similar("a", "", DEFAULT_SIMILARITY_THRESHOLD));
        // an empty string is dissimilar even with a zero threshold
        assert!(!is_similar("", "a", 0.0));
    }

    #[test]
    fn test_is_similar_case_insensitive_exact_match() {
        assert!(is_similar("Smith", "smith", 0.99));
    }

    #[test]
    fn test_is_similar_threshold_is_inclusive() {
        assert!(is_similar("abcd", "abce", 0.75));
        // three edits over ten characters lands exactly on 0.7
        assert_eq!(distance("abcdefghij", "abcdefgxyz"), 3);
        assert!(is_similar("abcdefghij", "abcdefgxyz", 0.7));
        assert!(!is_similar("abcdefghij", "abcdefwxyz", 0.7));

        let score = similarity("Horváth Anna", "Horvát Ana");
        assert!(is_similar("Horváth Anna", "Horvát Ana", score));
        assert!(!is_similar("Horváth Anna", "Horvát Ana", score + 1e-9));
    }

    #[test]
    fn test_is_similar_default_threshold() {
        assert!(is_similar("Kiss Anna", "Kiss Ana", DEFAULT_SIMILARITY_THRESHOLD));
        assert!(!is_similar("Kiss Anna", "Nagy Béla", DEFAULT_SIMILARITY_THRESHOLD));
    }
}
