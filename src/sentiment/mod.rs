//! # Sentiment Analysis Module
//!
//! Polarity scoring, labelling and batch aggregation.

mod aggregator;
mod analyzer;
mod lexicon;

pub use aggregator::{
    SentimentAggregator, SentimentDistribution, SentimentRecord, TrendPoint, TrendSeries,
};
pub use analyzer::{FnScorer, PolarityScorer, SentimentClassifier, SentimentLabel, SentimentResult};
pub use lexicon::{LexiconResult, ReviewLexicon};
