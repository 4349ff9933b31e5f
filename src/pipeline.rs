//! # Batch Pipeline
//!
//! Runs classification, keyword extraction, aggregation and the optional
//! evaluation over one batch of reviews.

use crate::data::{Review, ReviewDataset};
use crate::evaluation::{evaluate, Evaluation};
use crate::keywords::{KeywordExtractor, Theme, ThemeCounter};
use crate::sentiment::{
    SentimentAggregator, SentimentClassifier, SentimentDistribution, SentimentRecord,
    SentimentResult, TrendSeries,
};
use crate::utils::config::AnalysisSettings;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Per-review output
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedReview {
    /// Position of the review in the input batch
    pub index: usize,
    /// The review
    pub review: Review,
    /// Sentiment, absent when the scorer failed
    pub sentiment: Option<SentimentResult>,
    /// Ranked keywords
    pub keywords: Vec<String>,
    /// Scorer failure message
    pub error: Option<String>,
}

/// Everything produced by one run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Number of reviews received, including those without text
    pub input_count: usize,
    /// Reviews with text, in input order
    pub reviews: Vec<AnalyzedReview>,
    /// Label counts
    pub distribution: SentimentDistribution,
    /// Daily mean polarity
    pub trend: TrendSeries,
    /// Corpus-wide top keywords
    pub themes: Vec<Theme>,
    /// Evaluation outcome
    pub evaluation: Evaluation,
}

impl BatchReport {
    /// Reviews dropped for missing text
    pub fn excluded_count(&self) -> usize {
        self.input_count - self.reviews.len()
    }

    /// Reviews whose scoring failed
    pub fn failed_count(&self) -> usize {
        self.reviews.iter().filter(|r| r.sentiment.is_none()).count()
    }
}

/// Batch analyzer
pub struct BatchAnalyzer {
    classifier: SentimentClassifier,
    extractor: KeywordExtractor,
    aggregator: SentimentAggregator,
    top_themes: usize,
    parallel: bool,
}

impl Default for BatchAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchAnalyzer {
    /// Create an analyzer with the built-in lexicon scorer and default settings
    pub fn new() -> Self {
        Self::from_settings(&AnalysisSettings::default())
    }

    /// Create an analyzer from configuration
    pub fn from_settings(settings: &AnalysisSettings) -> Self {
        Self {
            classifier: SentimentClassifier::new(),
            extractor: KeywordExtractor::new().with_top_k(settings.top_keywords),
            aggregator: SentimentAggregator::new().with_epoch(settings.trend_epoch),
            top_themes: settings.top_themes,
            parallel: settings.parallel,
        }
    }

    /// Replace the sentiment classifier
    pub fn with_classifier(mut self, classifier: SentimentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Enable or disable parallel per-review scoring
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the number of themes kept
    pub fn with_top_themes(mut self, top_themes: usize) -> Self {
        self.top_themes = top_themes;
        self
    }

    /// Analyze reviews; evaluation runs when any review carries a label
    pub fn analyze(&self, reviews: &[Review]) -> BatchReport {
        let has_ground_truth = reviews.iter().any(|r| r.has_text() && r.label.is_some());
        self.run(reviews, has_ground_truth)
    }

    /// Analyze a loaded dataset; evaluation runs when it had a label column
    pub fn analyze_dataset(&self, dataset: &ReviewDataset) -> BatchReport {
        self.run(&dataset.reviews(), dataset.has_label_column)
    }

    fn run(&self, reviews: &[Review], has_ground_truth: bool) -> BatchReport {
        let retained: Vec<(usize, &Review)> = reviews
            .iter()
            .enumerate()
            .filter(|(_, review)| review.has_text())
            .collect();

        info!(
            total = reviews.len(),
            retained = retained.len(),
            scorer = self.classifier.scorer_name(),
            parallel = self.parallel,
            "Analyzing review batch"
        );

        // collect() keeps input order for both paths
        let analyzed: Vec<AnalyzedReview> = if self.parallel {
            retained
                .par_iter()
                .map(|(index, review)| self.analyze_one(*index, review))
                .collect()
        } else {
            retained
                .iter()
                .map(|(index, review)| self.analyze_one(*index, review))
                .collect()
        };

        let records: Vec<SentimentRecord> = analyzed
            .iter()
            .map(|a| SentimentRecord {
                result: a.sentiment,
                timestamp: a.review.timestamp,
            })
            .collect();
        let (distribution, trend) = self.aggregator.aggregate(&records);

        let themes = analyzed
            .iter()
            .map(|a| a.keywords.as_slice())
            .collect::<ThemeCounter>()
            .top(self.top_themes);

        let evaluation = if has_ground_truth {
            self.evaluate(&analyzed)
        } else {
            info!("Ground-truth labels not found, skipping evaluation");
            Evaluation::Skipped
        };

        BatchReport {
            input_count: reviews.len(),
            reviews: analyzed,
            distribution,
            trend,
            themes,
            evaluation,
        }
    }

    fn analyze_one(&self, index: usize, review: &Review) -> AnalyzedReview {
        let text = review.text.as_deref();

        let (sentiment, error) = match self.classifier.classify(text) {
            Ok(sentiment) => (sentiment, None),
            Err(e) => {
                if e.is_isolated() {
                    warn!(
                        index,
                        error = %e,
                        "Sentiment scoring failed, result recorded as absent"
                    );
                } else {
                    error!(
                        index,
                        error = %e,
                        "Scorer raised an unexpected error, result recorded as absent"
                    );
                }
                (None, Some(e.to_string()))
            }
        };
        let keywords = self.extractor.extract(text);

        debug!(index, ?sentiment, keywords = keywords.len(), "Analyzed review");

        AnalyzedReview {
            index,
            review: review.clone(),
            sentiment,
            keywords,
            error,
        }
    }

    fn evaluate(&self, analyzed: &[AnalyzedReview]) -> Evaluation {
        let unrecognized = analyzed
            .iter()
            .filter(|a| a.review.label.is_some() && a.review.ground_truth().is_none())
            .count();
        if unrecognized > 0 {
            warn!(
                unrecognized,
                "Labels other than POSITIVE, NEUTRAL or NEGATIVE are left out of evaluation"
            );
        }

        let predicted: Vec<_> = analyzed.iter().map(|a| a.sentiment.map(|s| s.label)).collect();
        let truth: Vec<Option<&str>> = analyzed.iter().map(|a| a.review.label.as_deref()).collect();

        match evaluate(&predicted, &truth) {
            Ok(report) => Evaluation::Evaluated(report),
            Err(e) => {
                // both vectors come from `analyzed`, so lengths always match
                warn!(error = %e, "Evaluation failed");
                Evaluation::Skipped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::sentiment::{FnScorer, SentimentLabel};
    use chrono::NaiveDate;

    fn stub(text: &str) -> crate::error::Result<f64> {
        Ok(match text {
            t if t.contains("good") => 0.5,
            t if t.contains("bad") => -0.5,
            t if t.contains("boom") => return Err(Error::Scorer("boom".into())),
            _ => 0.0,
        })
    }

    fn analyzer() -> BatchAnalyzer {
        BatchAnalyzer::new().with_classifier(SentimentClassifier::with_scorer(FnScorer::new(stub)))
    }

    #[test]
    fn test_null_text_excluded() {
        let reviews = vec![
            Review::new("good product"),
            Review::new("bad product"),
            Review::new(""),
            Review::absent(),
        ];
        let report = analyzer().analyze(&reviews);

        assert_eq!(report.input_count, 4);
        assert_eq!(report.reviews.len(), 3);
        assert_eq!(report.excluded_count(), 1);
        assert_eq!(report.distribution.get(SentimentLabel::Positive), 1);
        assert_eq!(report.distribution.get(SentimentLabel::Negative), 1);
        assert_eq!(report.distribution.get(SentimentLabel::Neutral), 1);
        assert_eq!(report.distribution.total(), 3);
        assert_eq!(report.evaluation, Evaluation::Skipped);
    }

    #[test]
    fn test_scorer_failure_is_isolated() {
        let reviews = vec![
            Review::new("good"),
            Review::new("boom goes the blender"),
            Review::new("bad"),
        ];
        let report = analyzer().analyze(&reviews);

        assert_eq!(report.reviews.len(), 3);
        assert_eq!(report.failed_count(), 1);
        assert!(report.reviews[1].error.is_some());
        assert_eq!(report.reviews[1].keywords, vec!["boom", "goes", "blender"]);
        assert_eq!(report.distribution.total(), 2);
        // failed review still occupies its synthesized day
        assert_eq!(report.trend.len(), 3);
        assert_eq!(report.trend.points()[1].count, 0);
    }

    #[test]
    fn test_unexpected_scorer_error_is_recorded() {
        let classifier = SentimentClassifier::with_scorer(FnScorer::new(|_: &str| {
            Err(Error::InvalidInput("model not loaded".into()))
        }));
        let report = BatchAnalyzer::new()
            .with_classifier(classifier)
            .analyze(&[Review::new("good"), Review::new("bad")]);

        assert_eq!(report.failed_count(), 2);
        assert!(report.distribution.is_empty());
        assert!(report.reviews[0].error.as_deref().unwrap().contains("model not loaded"));
    }

    #[test]
    fn test_unrecognized_labels_left_out() {
        let reviews = vec![
            Review::new("good").with_label("POSITIVE"),
            Review::new("bad").with_label(" NEGATIVE "),
        ];
        let report = analyzer().analyze(&reviews);
        let eval = report.evaluation.report().unwrap();
        assert_eq!(eval.evaluated, 1);
        assert_eq!(eval.accuracy, 1.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let reviews: Vec<Review> = (0..64)
            .map(|i| {
                if i % 3 == 0 {
                    Review::new(format!("good item number{}", i))
                } else {
                    Review::new(format!("bad delivery attempt{}", i % 5))
                }
            })
            .collect();

        let parallel = analyzer().with_parallel(true).analyze(&reviews);
        let sequential = analyzer().with_parallel(false).analyze(&reviews);

        let idx = |r: &BatchReport| r.reviews.iter().map(|a| a.index).collect::<Vec<_>>();
        assert_eq!(idx(&parallel), idx(&sequential));
        assert_eq!(parallel.trend, sequential.trend);
        assert_eq!(parallel.themes, sequential.themes);
    }

    #[test]
    fn test_evaluation_runs_with_labels() {
        let reviews = vec![
            Review::new("good").with_label("POSITIVE"),
            Review::new("bad").with_label("POSITIVE"),
            Review::new("bad").with_label("NEGATIVE"),
        ];
        let report = analyzer().analyze(&reviews);
        let eval = report.evaluation.report().unwrap();
        assert!((eval.accuracy - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_real_timestamps_used() {
        let day = |d| NaiveDate::from_ymd_opt(2025, 5, d).unwrap();
        let reviews = vec![
            Review::new("good").on_date(day(3)),
            Review::new("bad").on_date(day(1)),
        ];
        let report = analyzer().analyze(&reviews);
        assert_eq!(report.trend.len(), 3);
        assert_eq!(report.trend.points()[0].date, day(1));
    }
}
