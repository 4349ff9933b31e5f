//! # Review Sentiment
//!
//! Sentiment labelling, keyword themes, daily trends and optional
//! evaluation for batches of free-text customer reviews.
//!
//! ## Modules
//!
//! - `sentiment` - Polarity scoring, labelling and aggregation
//! - `keywords` - Per-review keywords and corpus-level themes
//! - `evaluation` - Accuracy, per-class metrics and confusion matrix
//! - `data` - Review records, CSV loading and preprocessing
//! - `pipeline` - One batch run end to end
//! - `report` - Output file writers
//! - `utils` - Configuration
//!
//! ## Example Usage
//!
//! ```
//! use review_sentiment::{BatchAnalyzer, Review, SentimentLabel};
//!
//! let reviews = vec![
//!     Review::new("Great product, fast delivery"),
//!     Review::new("Terrible support, the item arrived broken"),
//!     Review::absent(),
//! ];
//!
//! let report = BatchAnalyzer::new().analyze(&reviews);
//!
//! assert_eq!(report.reviews.len(), 2);
//! assert_eq!(report.distribution.get(SentimentLabel::Positive), 1);
//! assert_eq!(report.distribution.get(SentimentLabel::Negative), 1);
//! ```

pub mod data;
pub mod error;
pub mod evaluation;
pub mod keywords;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod utils;

// Re-exports for convenience
pub use data::{Review, ReviewDataset, ReviewLoader, TextPreprocessor};
pub use error::{Error, Result};
pub use evaluation::{evaluate, ConfusionMatrix, Evaluation, EvaluationReport};
pub use keywords::{KeywordExtractor, Theme, ThemeCounter};
pub use pipeline::{AnalyzedReview, BatchAnalyzer, BatchReport};
pub use sentiment::{
    FnScorer, PolarityScorer, ReviewLexicon, SentimentAggregator, SentimentClassifier,
    SentimentDistribution, SentimentLabel, SentimentResult, TrendSeries,
};
pub use utils::{load_config, AppConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    use chrono::NaiveDate;

    /// Keywords extracted per review
    pub const TOP_KEYWORDS: usize = 5;

    /// Themes reported for the whole batch
    pub const TOP_THEMES: usize = 20;

    /// Themes printed to the console
    pub const CONSOLE_THEMES: usize = 10;

    /// First synthesized date when reviews carry no timestamp
    pub fn trend_epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN)
    }
}
