//! # Keyword Extractor
//!
//! Frequency-ranked salient terms of a single review.

use super::frequency::FrequencyTable;
use crate::defaults;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Characters outside the Latin alphabet and whitespace
static NON_LATIN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z\s]").unwrap());

/// Common English function words and pronouns excluded from keywords
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "it", "in", "of", "for", "and", "to", "with", "on", "this",
    "that", "be", "are", "was", "were", "as", "but", "not", "i", "you", "he", "she", "we",
    "they", "me", "him", "her", "us", "them", "my", "your", "his", "its", "our", "their",
    "what", "when", "where", "why", "how", "which", "who", "whom", "whose", "from", "at",
    "by", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "up", "down", "out", "off", "over", "under", "again", "further",
    "then", "once", "here", "there", "all", "any", "both", "each", "few", "more", "most",
    "other", "some", "such", "no", "nor", "only", "own", "same", "so", "than", "too",
    "very", "s", "t", "can", "will", "just", "don", "should", "now",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Check membership in the stop-word set
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Keyword extractor
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    /// Maximum number of keywords returned per review
    top_k: usize,
    /// Tokens with this many characters or fewer are dropped
    max_dropped_len: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// Create an extractor returning the default number of keywords
    pub fn new() -> Self {
        Self {
            top_k: defaults::TOP_KEYWORDS,
            max_dropped_len: 2,
        }
    }

    /// Set the number of keywords per review
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Number of keywords per review
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Strip non-Latin characters, lower-case and split on whitespace
    pub fn normalize(&self, text: &str) -> Vec<String> {
        NON_LATIN_REGEX
            .replace_all(text, "")
            .to_lowercase()
            .split_whitespace()
            .map(String::from)
            .collect()
    }

    /// Normalized tokens with stop-words and short tokens removed
    pub fn candidate_terms(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .into_iter()
            .filter(|token| token.chars().count() > self.max_dropped_len && !is_stop_word(token))
            .collect()
    }

    /// Keywords with their in-review frequency
    pub fn extract_with_counts(&self, text: &str) -> Vec<(String, usize)> {
        let mut table = FrequencyTable::new();
        table.extend(self.candidate_terms(text));
        table.most_common(self.top_k)
    }

    /// Up to `top_k` distinct keywords, most frequent first.
    ///
    /// Absent text yields no keywords.
    pub fn extract(&self, text: Option<&str>) -> Vec<String> {
        match text {
            Some(text) => self
                .extract_with_counts(text)
                .into_iter()
                .map(|(term, _)| term)
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sentence() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract(Some("the product is good and the service is good"));
        assert_eq!(keywords, vec!["good", "product", "service"]);
    }

    #[test]
    fn test_absent_text() {
        assert!(KeywordExtractor::new().extract(None).is_empty());
        assert!(KeywordExtractor::new().extract(Some("")).is_empty());
    }

    #[test]
    fn test_normalization_strips_non_latin() {
        let extractor = KeywordExtractor::new();
        assert_eq!(
            extractor.normalize("Don't BUY!! 5-star? café"),
            vec!["dont", "buy", "star", "caf"]
        );
    }

    #[test]
    fn test_short_and_stop_words_dropped() {
        let extractor = KeywordExtractor::new();
        let terms = extractor.candidate_terms("It is ok, we go by car to them");
        assert_eq!(terms, vec!["car"]);
    }

    #[test]
    fn test_top_k_limit_and_ties() {
        let extractor = KeywordExtractor::new().with_top_k(2);
        let keywords = extractor.extract(Some("zebra apple mango apple zebra kiwi"));
        assert_eq!(keywords, vec!["zebra", "apple"]);
    }

    #[test]
    fn test_idempotent() {
        let extractor = KeywordExtractor::new();
        let text = "Battery life great, battery charges fast, screen great too";
        assert_eq!(extractor.extract(Some(text)), extractor.extract(Some(text)));
    }

    #[test]
    fn test_counts() {
        let extractor = KeywordExtractor::new();
        let counts = extractor.extract_with_counts("noise noise noise quiet");
        assert_eq!(counts[0], ("noise".to_string(), 3));
        assert_eq!(counts[1], ("quiet".to_string(), 1));
    }
}
