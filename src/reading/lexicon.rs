//! Process-wide word tables used by the tokenizer and the analyzer.
//!
//! Everything here is immutable. Lookups expect the normalized form
//! (lowercase, punctuation stripped) produced by `timing::normalize_word`.

use lazy_static::lazy_static;
use std::collections::HashSet;

const HIGH_FREQUENCY_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "when",
    "make", "can", "like", "time", "no", "just", "him", "know", "take", "people", "into",
    "year", "your", "good", "some", "could", "them", "see", "other", "than", "then", "now",
    "look", "only", "come", "its", "over", "think", "also", "back", "after", "use", "two",
    "how", "our", "work", "first", "well", "way", "even", "new", "want", "because", "any",
    "these", "give", "day", "most", "us", "is", "was", "are", "were", "been", "has", "had",
    "did", "said",
];

const TRANSITION_WORDS: &[&str] = &[
    "however", "therefore", "moreover", "furthermore", "nevertheless", "nonetheless",
    "consequently", "meanwhile", "otherwise", "thus", "hence", "accordingly", "additionally",
    "instead", "similarly", "likewise", "conversely", "subsequently", "finally", "indeed",
    "besides", "namely", "specifically", "ultimately", "alternatively",
];

const SUBORDINATING_CONJUNCTIONS: &[&str] = &[
    "although", "because", "since", "unless", "whereas", "while", "though", "whether",
    "until", "whenever", "wherever", "once", "provided", "if", "after", "before", "when",
    "where",
];

/// Collocation catalog, scanned top to bottom; the first matching phrase wins.
///
/// Phrases are ordered longest first so a longer phrase is never shadowed by
/// one of its own prefixes.
pub const COLLOCATIONS: &[&[&str]] = &[
    &["as", "a", "matter", "of", "fact"],
    &["on", "the", "other", "hand"],
    &["at", "the", "same", "time"],
    &["in", "order", "to"],
    &["as", "well", "as"],
    &["in", "spite", "of"],
    &["as", "a", "result"],
    &["in", "other", "words"],
    &["as", "soon", "as"],
    &["as", "long", "as"],
    &["in", "terms", "of"],
    &["with", "respect", "to"],
    &["by", "the", "way"],
    &["in", "addition"],
    &["for", "example"],
    &["for", "instance"],
    &["even", "though"],
    &["so", "that"],
    &["such", "as"],
    &["rather", "than"],
    &["according", "to"],
    &["because", "of"],
    &["due", "to"],
    &["in", "fact"],
    &["of", "course"],
    &["at", "least"],
    &["prior", "to"],
    &["in", "contrast"],
];

lazy_static! {
    static ref HIGH_FREQUENCY: HashSet<&'static str> =
        HIGH_FREQUENCY_WORDS.iter().copied().collect();
    static ref TRANSITIONS: HashSet<&'static str> = TRANSITION_WORDS.iter().copied().collect();
    static ref SUBORDINATORS: HashSet<&'static str> =
        SUBORDINATING_CONJUNCTIONS.iter().copied().collect();
}

pub fn is_high_frequency(normalized: &str) -> bool {
    HIGH_FREQUENCY.contains(normalized)
}

pub fn is_transition(normalized: &str) -> bool {
    TRANSITIONS.contains(normalized)
}

pub fn is_subordinator(normalized: &str) -> bool {
    SUBORDINATORS.contains(normalized)
}

/// Returns the first catalog phrase that the upcoming normalized words begin with.
pub fn find_collocation(upcoming: &[String]) -> Option<&'static [&'static str]> {
    COLLOCATIONS.iter().copied().find(|phrase| {
        phrase.len() <= upcoming.len()
            && phrase.iter().zip(upcoming).all(|(p, w)| *p == w.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_frequency_contains_function_words() {
        assert!(is_high_frequency("the"));
        assert!(is_high_frequency("because"));
        assert!(!is_high_frequency("photosynthesis"));
    }

    #[test]
    fn test_high_frequency_table_size() {
        assert!(HIGH_FREQUENCY.len() >= 100);
    }

    #[test]
    fn test_because_is_both_frequent_and_subordinator() {
        assert!(is_subordinator("because"));
        assert!(is_high_frequency("because"));
        assert!(!is_transition("because"));
    }

    #[test]
    fn test_transition_lookup() {
        assert!(is_transition("however"));
        assert!(!is_transition("house"));
    }

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_find_collocation_requires_full_phrase() {
        assert_eq!(
            find_collocation(&words("in order to succeed")),
            Some(&["in", "order", "to"][..])
        );
        assert_eq!(find_collocation(&words("in order")), None);
        assert_eq!(find_collocation(&words("order to succeed")), None);
    }

    #[test]
    fn test_catalog_is_longest_first() {
        let lengths: Vec<usize> = COLLOCATIONS.iter().map(|p| p.len()).collect();
        let mut sorted = lengths.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(lengths, sorted);
    }

    #[test]
    fn test_catalog_phrases_are_normalized() {
        for phrase in COLLOCATIONS {
            assert!(phrase.len() >= 2);
            for word in phrase.iter() {
                assert_eq!(*word, word.to_lowercase());
                assert!(word.chars().all(|c| c.is_alphanumeric()));
            }
        }
    }
}
