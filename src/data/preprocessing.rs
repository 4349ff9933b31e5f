//! # Text Preprocessing
//!
//! Text cleaning applied before polarity scoring.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").unwrap());
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Text preprocessor for review text
#[derive(Debug, Clone, Default)]
pub struct TextPreprocessor;

impl TextPreprocessor {
    /// Create a new text preprocessor
    pub fn new() -> Self {
        Self
    }

    /// Preprocess text for scoring
    ///
    /// Steps:
    /// 1. Unicode normalization (NFC)
    /// 2. Remove URLs
    /// 3. Convert to lowercase
    /// 4. Normalize whitespace
    pub fn preprocess(&self, text: &str) -> String {
        let normalized: String = text.nfc().collect();
        let no_urls = URL_REGEX.replace_all(&normalized, " ");
        let lowercase = no_urls.to_lowercase();
        let clean = WHITESPACE_REGEX.replace_all(&lowercase, " ");
        clean.trim().to_string()
    }

    /// Split into word tokens, trimming surrounding punctuation.
    ///
    /// Inner apostrophes are kept so contractions such as "don't" survive.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .map(|token| token.trim_matches('\''))
            .filter(|token| !token.is_empty())
            .map(String::from)
            .collect()
    }
}
