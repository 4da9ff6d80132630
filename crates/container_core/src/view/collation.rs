//! Name collation used by name-ordered views.
//!
//! Approximates locale string comparison without a locale database, in
//! levels: base letters (decomposed, accents stripped, case-folded), then
//! accents, then lowercase before uppercase, then raw code points. Hangul
//! syllables decompose into jamo that keep dictionary order.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compares two names for ascending name order.
///
/// Returns `Ordering::Equal` only for identical strings, so a descending
/// sort is the exact reverse of an ascending one for distinct names.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(base_letters(right))
        .then_with(|| with_accents(left).cmp(with_accents(right)))
        .then_with(|| compare_case(left, right))
        .then_with(|| left.cmp(right))
}

/// Case-insensitive containment used by search filtering.
///
/// An empty needle matches every haystack.
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    folded_needle.is_empty() || haystack.to_lowercase().contains(folded_needle)
}

fn base_letters(value: &str) -> impl Iterator<Item = char> + '_ {
    with_accents(value).filter(|letter| !is_combining_mark(*letter))
}

fn with_accents(value: &str) -> impl Iterator<Item = char> + '_ {
    value.nfd().flat_map(char::to_lowercase)
}

fn compare_case(left: &str, right: &str) -> Ordering {
    left.chars()
        .map(case_rank)
        .cmp(right.chars().map(case_rank))
}

fn case_rank(value: char) -> u8 {
    u8::from(value.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::{compare_names, contains_folded};
    use std::cmp::Ordering;

    #[test]
    fn letters_compare_case_insensitively_first() {
        assert_eq!(compare_names("Alpha", "beta"), Ordering::Less);
        assert_eq!(compare_names("beta", "Alpha"), Ordering::Greater);
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
    }

    #[test]
    fn accented_letters_sort_with_their_base_letter() {
        let mut names = vec!["fig", "Éclair", "zeta"];
        names.sort_by(|left, right| compare_names(left, right));
        assert_eq!(names, vec!["Éclair", "fig", "zeta"]);

        assert_eq!(compare_names("eclair", "éclair"), Ordering::Less);
        assert_eq!(compare_names("éclair", "ecluse"), Ordering::Less);
        assert_eq!(compare_names("Ångström", "beta"), Ordering::Less);
    }

    #[test]
    fn lowercase_precedes_uppercase_on_case_only_difference() {
        assert_eq!(compare_names("alpha", "Alpha"), Ordering::Less);
        assert_eq!(compare_names("Alpha", "alpha"), Ordering::Greater);
    }

    #[test]
    fn only_identical_names_are_equal() {
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
        assert_ne!(compare_names("ß", "ss"), Ordering::Equal);
    }

    #[test]
    fn hangul_names_follow_dictionary_order() {
        assert_eq!(compare_names("가나다", "나다라"), Ordering::Less);
        assert_eq!(compare_names("하늘", "바다"), Ordering::Greater);
    }

    #[test]
    fn contains_folded_matches_substrings() {
        assert!(contains_folded("Alpha", "al"));
        assert!(contains_folded("Alpha", ""));
        assert!(!contains_folded("beta", "al"));
    }
}
