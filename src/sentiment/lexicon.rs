//! # Review Lexicon
//!
//! Rule-based polarity scorer for product and service reviews.

use super::analyzer::PolarityScorer;
use crate::data::TextPreprocessor;
use crate::error::Result;
use std::collections::{HashMap, HashSet};

/// Review sentiment lexicon
///
/// Contains word-polarity mappings for customer review vocabulary.
pub struct ReviewLexicon {
    words: HashMap<String, f64>,
    /// Flip the next sentiment word
    negations: HashSet<String>,
    /// Multipliers for the next sentiment word
    intensifiers: HashMap<String, f64>,
    /// Tokenizer shared with the rest of the scoring path
    preprocessor: TextPreprocessor,
}

impl Default for ReviewLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewLexicon {
    /// Create a new lexicon with the default vocabulary
    pub fn new() -> Self {
        let positive_words = [
            ("good", 0.7),
            ("great", 0.8),
            ("excellent", 1.0),
            ("amazing", 0.6),
            ("awesome", 1.0),
            ("perfect", 1.0),
            ("love", 0.5),
            ("loved", 0.7),
            ("like", 0.2),
            ("nice", 0.6),
            ("best", 1.0),
            ("better", 0.5),
            ("happy", 0.8),
            ("satisfied", 0.5),
            ("recommend", 0.4),
            ("recommended", 0.4),
            ("fast", 0.2),
            ("quick", 0.3),
            ("easy", 0.4),
            ("comfortable", 0.4),
            ("reliable", 0.5),
            ("helpful", 0.5),
            ("friendly", 0.4),
            ("beautiful", 0.85),
            ("fantastic", 0.4),
            ("wonderful", 1.0),
            ("pleased", 0.5),
            ("worth", 0.3),
            ("fresh", 0.3),
            ("delicious", 1.0),
            ("sturdy", 0.4),
            ("clean", 0.4),
            ("smooth", 0.4),
            ("affordable", 0.4),
            ("fine", 0.4),
        ];

        let negative_words = [
            ("bad", -0.7),
            ("terrible", -1.0),
            ("awful", -1.0),
            ("horrible", -1.0),
            ("poor", -0.4),
            ("worst", -1.0),
            ("worse", -0.4),
            ("hate", -0.8),
            ("hated", -0.9),
            ("disappointed", -0.75),
            ("disappointing", -0.6),
            ("broken", -0.4),
            ("broke", -0.4),
            ("slow", -0.3),
            ("late", -0.3),
            ("rude", -0.3),
            ("useless", -0.5),
            ("waste", -0.2),
            ("defective", -0.5),
            ("cheap", -0.2),
            ("expensive", -0.5),
            ("dirty", -0.6),
            ("unhappy", -0.6),
            ("refund", -0.2),
            ("difficult", -0.5),
            ("annoying", -0.8),
            ("uncomfortable", -0.5),
            ("damaged", -0.5),
            ("faulty", -0.5),
            ("flimsy", -0.4),
            ("stale", -0.5),
            ("noisy", -0.3),
            ("wrong", -0.5),
            ("missing", -0.2),
        ];

        let mut words = HashMap::new();
        for (word, score) in positive_words.into_iter().chain(negative_words) {
            words.insert(word.to_string(), score);
        }

        let negations = [
            "not", "no", "never", "nothing", "none", "nobody", "neither", "nor",
            "cannot", "cant", "can't", "don't", "dont", "doesn't", "doesnt",
            "didn't", "didnt", "won't", "wont", "isn't", "isnt", "aren't",
            "arent", "wasn't", "wasnt", "weren't", "werent", "hardly", "barely",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let intensifiers = [
            ("very", 1.3),
            ("really", 1.3),
            ("extremely", 1.5),
            ("super", 1.3),
            ("so", 1.2),
            ("absolutely", 1.5),
            ("totally", 1.3),
            ("highly", 1.3),
            ("incredibly", 1.5),
            ("slightly", 0.5),
            ("somewhat", 0.7),
            ("fairly", 0.8),
            ("pretty", 0.9),
        ]
        .into_iter()
        .map(|(w, m)| (w.to_string(), m))
        .collect();

        Self {
            words,
            negations,
            intensifiers,
            preprocessor: TextPreprocessor::new(),
        }
    }

    /// Polarity of a single word, case-insensitive
    pub fn word_score(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    /// Add or override a word; the score is clamped to [-1, 1]
    pub fn add_word(&mut self, word: &str, score: f64) {
        self.words.insert(word.to_lowercase(), score.clamp(-1.0, 1.0));
    }

    /// Tokens arrive lower-cased from the preprocessor
    fn classify_token(&self, token: &str) -> Token {
        if self.negations.contains(token) {
            Token::Negation
        } else if let Some(&factor) = self.intensifiers.get(token) {
            Token::Intensifier(factor)
        } else if let Some(&score) = self.words.get(token) {
            Token::Sentiment(score)
        } else {
            Token::Other
        }
    }

    /// Mean score of the sentiment words in `text`.
    ///
    /// A negation flips and halves the next sentiment word. Intensifiers
    /// multiply into the next sentiment word and are reset by any other
    /// word in between.
    pub fn analyze(&self, text: &str) -> LexiconResult {
        let clean = self.preprocessor.preprocess(text);

        let mut matched_words = Vec::new();
        let mut negated = false;
        let mut factor = 1.0;

        for token in self.preprocessor.tokenize(&clean) {
            match self.classify_token(&token) {
                Token::Negation => negated = true,
                Token::Intensifier(f) => factor *= f,
                Token::Sentiment(base) => {
                    let signed = if negated { -0.5 * base } else { base };
                    matched_words.push((token, signed * factor));
                    negated = false;
                    factor = 1.0;
                }
                Token::Other => factor = 1.0,
            }
        }

        let polarity = match matched_words.len() {
            0 => 0.0,
            n => matched_words.iter().map(|(_, score)| score).sum::<f64>() / n as f64,
        };

        LexiconResult {
            polarity: polarity.clamp(-1.0, 1.0),
            matched_words,
        }
    }
}

/// Role of one token during scoring
enum Token {
    Negation,
    Intensifier(f64),
    Sentiment(f64),
    Other,
}

impl PolarityScorer for ReviewLexicon {
    fn score(&self, text: &str) -> Result<f64> {
        Ok(self.analyze(text).polarity)
    }

    fn name(&self) -> &str {
        "review-lexicon"
    }
}

/// Polarity plus the words that produced it
#[derive(Debug, Clone)]
pub struct LexiconResult {
    /// Overall polarity (-1 to 1)
    pub polarity: f64,
    /// Words that matched with their final scores
    pub matched_words: Vec<(String, f64)>,
}

impl LexiconResult {
    /// Matched sentiment words
    pub fn word_count(&self) -> usize {
        self.matched_words.len()
    }
}
