//! # Sentiment Classifier
//!
//! Maps review text to a discrete label through a pluggable polarity scorer.

use super::lexicon::ReviewLexicon;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discrete sentiment class.
///
/// Variant order is the fixed row/column order used by evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    /// Unfavorable review (polarity < 0)
    Negative,
    /// Exactly zero polarity
    Neutral,
    /// Favorable review (polarity > 0)
    Positive,
}

impl SentimentLabel {
    /// All labels in evaluation order
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
    ];

    /// Threshold a polarity into a label
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            SentimentLabel::Positive
        } else if polarity < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
            SentimentLabel::Positive => "POSITIVE",
        }
    }

    /// Position in [`SentimentLabel::ALL`]
    pub fn index(&self) -> usize {
        match self {
            SentimentLabel::Negative => 0,
            SentimentLabel::Neutral => 1,
            SentimentLabel::Positive => 2,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = Error;

    /// Only the exact upper-case names are recognized.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NEGATIVE" => Ok(SentimentLabel::Negative),
            "NEUTRAL" => Ok(SentimentLabel::Neutral),
            "POSITIVE" => Ok(SentimentLabel::Positive),
            other => Err(Error::ParseError(format!(
                "unrecognized sentiment label '{}'",
                other
            ))),
        }
    }
}

/// Sentiment attached to a single review
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Label derived from `polarity`
    pub label: SentimentLabel,
    /// Polarity in [-1, 1]
    pub polarity: f64,
}

impl SentimentResult {
    /// Build a result whose label is derived from the polarity
    pub fn from_polarity(polarity: f64) -> Self {
        Self {
            label: SentimentLabel::from_polarity(polarity),
            polarity,
        }
    }
}

/// Maps raw text to a polarity in [-1, 1].
pub trait PolarityScorer: Send + Sync {
    /// Score a single text
    fn score(&self, text: &str) -> Result<f64>;

    /// Scorer name, used in logs
    fn name(&self) -> &str {
        "custom"
    }
}

/// Adapts a plain function or closure into a [`PolarityScorer`]
pub struct FnScorer<F> {
    func: F,
    name: String,
}

impl<F> FnScorer<F>
where
    F: Fn(&str) -> Result<f64> + Send + Sync,
{
    /// Wrap a scoring function
    pub fn new(func: F) -> Self {
        Self {
            func,
            name: "fn".to_string(),
        }
    }

    /// Set the scorer name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<F> PolarityScorer for FnScorer<F>
where
    F: Fn(&str) -> Result<f64> + Send + Sync,
{
    fn score(&self, text: &str) -> Result<f64> {
        (self.func)(text)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Sentiment classifier backed by an injected polarity scorer
pub struct SentimentClassifier {
    scorer: Box<dyn PolarityScorer>,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentClassifier {
    /// Create a classifier using the built-in review lexicon
    pub fn new() -> Self {
        Self::with_scorer(ReviewLexicon::new())
    }

    /// Create a classifier with a custom scorer
    pub fn with_scorer(scorer: impl PolarityScorer + 'static) -> Self {
        Self {
            scorer: Box::new(scorer),
        }
    }

    /// Name of the underlying scorer
    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Classify possibly-absent text.
    ///
    /// Absent text yields `Ok(None)`. Scorer failures are returned as
    /// [`Error::Scorer`] and only concern this one review.
    pub fn classify(&self, text: Option<&str>) -> Result<Option<SentimentResult>> {
        match text {
            None => Ok(None),
            Some(text) => self.classify_text(text).map(Some),
        }
    }

    /// Classify a present text
    pub fn classify_text(&self, text: &str) -> Result<SentimentResult> {
        let raw = self.scorer.score(text)?;
        if !raw.is_finite() {
            return Err(Error::Scorer(format!(
                "{} returned non-finite polarity {}",
                self.scorer.name(),
                raw
            )));
        }
        Ok(SentimentResult::from_polarity(raw.clamp(-1.0, 1.0)))
    }
}
