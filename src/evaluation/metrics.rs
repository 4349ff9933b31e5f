//! Classification metrics for predicted sentiment against ground truth
//!
//! Accuracy, per-class precision/recall/F1 and a 3x3 confusion matrix over
//! the fixed label order NEGATIVE, NEUTRAL, POSITIVE.

use crate::error::{Error, Result};
use crate::sentiment::SentimentLabel;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::{info, warn};

/// Confusion matrix, rows = true label, columns = predicted label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    counts: [[usize; 3]; 3],
}

impl ConfusionMatrix {
    /// Build from (true, predicted) pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (SentimentLabel, SentimentLabel)>,
    {
        let mut counts = [[0usize; 3]; 3];
        for (truth, predicted) in pairs {
            counts[truth.index()][predicted.index()] += 1;
        }
        Self { counts }
    }

    /// Cell count
    pub fn get(&self, truth: SentimentLabel, predicted: SentimentLabel) -> usize {
        self.counts[truth.index()][predicted.index()]
    }

    /// Raw rows
    pub fn rows(&self) -> &[[usize; 3]; 3] {
        &self.counts
    }

    /// True instances of a class
    pub fn row_sum(&self, truth: SentimentLabel) -> usize {
        self.counts[truth.index()].iter().sum()
    }

    /// Predicted instances of a class
    pub fn column_sum(&self, predicted: SentimentLabel) -> usize {
        self.counts.iter().map(|row| row[predicted.index()]).sum()
    }

    /// Diagonal sum
    pub fn correct(&self) -> usize {
        (0..3).map(|i| self.counts[i][i]).sum()
    }

    /// Total samples
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Bracketed matrix text, one row per line
    pub fn display(&self) -> String {
        let width = self
            .counts
            .iter()
            .flatten()
            .map(|c| c.to_string().len())
            .max()
            .unwrap_or(1);

        let rows: Vec<String> = self
            .counts
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|c| format!("{:>width$}", c)).collect();
                format!("[{}]", cells.join(" "))
            })
            .collect();

        format!("[{}]", rows.join("\n "))
    }
}

/// Precision, recall and F1 for one class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// Class
    pub label: SentimentLabel,
    /// TP / (TP + FP), 0 when nothing was predicted as this class
    pub precision: f64,
    /// TP / (TP + FN), 0 when the class never occurs
    pub recall: f64,
    /// Harmonic mean of precision and recall, 0 when both are 0
    pub f1: f64,
    /// Number of true instances
    pub support: usize,
}

impl ClassMetrics {
    fn from_matrix(cm: &ConfusionMatrix, label: SentimentLabel) -> Self {
        let tp = cm.get(label, label) as f64;
        let predicted = cm.column_sum(label) as f64;
        let support = cm.row_sum(label);

        let precision = if predicted > 0.0 { tp / predicted } else { 0.0 };
        let recall = if support > 0 { tp / support as f64 } else { 0.0 };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            label,
            precision,
            recall,
            f1,
            support,
        }
    }
}

/// Averaged precision/recall/F1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    /// Averaged precision
    pub precision: f64,
    /// Averaged recall
    pub recall: f64,
    /// Averaged F1
    pub f1: f64,
}

impl AverageMetrics {
    fn macro_average(classes: &[ClassMetrics]) -> Self {
        let n = classes.len() as f64;
        Self {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n,
            f1: classes.iter().map(|c| c.f1).sum::<f64>() / n,
        }
    }

    fn weighted_average(classes: &[ClassMetrics]) -> Self {
        let total: usize = classes.iter().map(|c| c.support).sum();
        if total == 0 {
            return Self {
                precision: 0.0,
                recall: 0.0,
                f1: 0.0,
            };
        }
        let weighted = |f: fn(&ClassMetrics) -> f64| {
            classes.iter().map(|c| f(c) * c.support as f64).sum::<f64>() / total as f64
        };
        Self {
            precision: weighted(|c| c.precision),
            recall: weighted(|c| c.recall),
            f1: weighted(|c| c.f1),
        }
    }
}

/// Per-class breakdown, or why it is missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EvaluationDetail {
    /// Full per-class metrics
    Full {
        /// Metrics in label order
        per_class: Vec<ClassMetrics>,
        /// Confusion matrix
        confusion: ConfusionMatrix,
        /// Unweighted mean over classes
        macro_avg: AverageMetrics,
        /// Support-weighted mean over classes
        weighted_avg: AverageMetrics,
    },
    /// Detailed metrics unavailable
    Degraded {
        /// Reason shown next to the accuracy
        reason: String,
    },
}

/// Result of comparing predictions with ground truth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Fraction of evaluated rows predicted correctly
    pub accuracy: f64,
    /// Rows with a recognized ground-truth label and a prediction
    pub evaluated: usize,
    /// Per-class detail
    pub detail: EvaluationDetail,
}

impl EvaluationReport {
    /// Whether detailed metrics are missing
    pub fn is_degraded(&self) -> bool {
        matches!(self.detail, EvaluationDetail::Degraded { .. })
    }

    /// Metrics for one class
    pub fn class(&self, label: SentimentLabel) -> Option<&ClassMetrics> {
        match &self.detail {
            EvaluationDetail::Full { per_class, .. } => per_class.iter().find(|c| c.label == label),
            EvaluationDetail::Degraded { .. } => None,
        }
    }

    /// Confusion matrix, if computed
    pub fn confusion(&self) -> Option<&ConfusionMatrix> {
        match &self.detail {
            EvaluationDetail::Full { confusion, .. } => Some(confusion),
            EvaluationDetail::Degraded { .. } => None,
        }
    }

    /// Tabular per-class report
    pub fn classification_report(&self) -> Option<String> {
        let EvaluationDetail::Full {
            per_class,
            macro_avg,
            weighted_avg,
            ..
        } = &self.detail
        else {
            return None;
        };

        let mut s = String::new();
        let _ = writeln!(
            s,
            "{:>12} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        );
        s.push('\n');
        for c in per_class {
            let _ = writeln!(
                s,
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                c.label.as_str(),
                c.precision,
                c.recall,
                c.f1,
                c.support
            );
        }
        s.push('\n');
        let _ = writeln!(
            s,
            "{:>12} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy", "", "", self.accuracy, self.evaluated
        );
        for (name, avg) in [("macro avg", macro_avg), ("weighted avg", weighted_avg)] {
            let _ = writeln!(
                s,
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, avg.precision, avg.recall, avg.f1, self.evaluated
            );
        }
        Some(s)
    }

    /// Summary lines for the run report
    pub fn summary_lines(&self) -> Vec<String> {
        match &self.detail {
            EvaluationDetail::Full { confusion, .. } => {
                let mut lines = vec![format!("Accuracy: {:.4}", self.accuracy)];
                if let Some(report) = self.classification_report() {
                    lines.push(format!("\nClassification Report:\n{}", report));
                }
                lines.push(format!(
                    "Confusion Matrix (rows=true, cols=pred) [NEGATIVE, NEUTRAL, POSITIVE]:\n{}",
                    confusion.display()
                ));
                lines
            }
            EvaluationDetail::Degraded { reason } => vec![format!(
                "Accuracy: {:.4} (detailed metrics unavailable: {})",
                self.accuracy, reason
            )],
        }
    }
}

/// Outcome of the optional evaluation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Evaluation {
    /// No ground truth in the input
    Skipped,
    /// Predictions were compared with ground truth
    Evaluated(EvaluationReport),
}

impl Evaluation {
    /// The report, if evaluation ran
    pub fn report(&self) -> Option<&EvaluationReport> {
        match self {
            Evaluation::Evaluated(report) => Some(report),
            Evaluation::Skipped => None,
        }
    }

    /// Summary lines for the run report
    pub fn summary_lines(&self) -> Vec<String> {
        match self {
            Evaluation::Evaluated(report) => report.summary_lines(),
            Evaluation::Skipped => {
                vec!["Ground-truth labels not found; skipped evaluation metrics.".to_string()]
            }
        }
    }
}

/// Compare predicted labels with raw ground-truth values.
///
/// Rows whose truth is not exactly one of the three label names, or whose
/// prediction is absent, are left out.
pub fn evaluate<S: AsRef<str>>(
    predicted: &[Option<SentimentLabel>],
    truth: &[Option<S>],
) -> Result<EvaluationReport> {
    if predicted.len() != truth.len() {
        return Err(Error::InvalidInput(format!(
            "{} predictions for {} ground-truth labels",
            predicted.len(),
            truth.len()
        )));
    }

    let pairs: Vec<(SentimentLabel, SentimentLabel)> = predicted
        .iter()
        .zip(truth)
        .filter_map(|(pred, truth)| {
            let raw: &str = truth.as_ref()?.as_ref();
            let truth = raw.parse::<SentimentLabel>().ok()?;
            Some((truth, (*pred)?))
        })
        .collect();

    if pairs.is_empty() {
        warn!("No rows with a recognized ground-truth label, detailed metrics unavailable");
        return Ok(EvaluationReport {
            accuracy: 0.0,
            evaluated: 0,
            detail: EvaluationDetail::Degraded {
                reason: "no rows with a recognized ground-truth label".to_string(),
            },
        });
    }

    let confusion = ConfusionMatrix::from_pairs(pairs.iter().copied());
    let evaluated = confusion.total();
    let accuracy = confusion.correct() as f64 / evaluated as f64;

    let per_class: Vec<ClassMetrics> = SentimentLabel::ALL
        .iter()
        .map(|label| ClassMetrics::from_matrix(&confusion, *label))
        .collect();
    let macro_avg = AverageMetrics::macro_average(&per_class);
    let weighted_avg = AverageMetrics::weighted_average(&per_class);

    info!(evaluated, accuracy, "Evaluated predictions against ground truth");

    Ok(EvaluationReport {
        accuracy,
        evaluated,
        detail: EvaluationDetail::Full {
            per_class,
            confusion,
            macro_avg,
            weighted_avg,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use SentimentLabel::*;

    #[test]
    fn test_accuracy_two_of_three() {
        let predicted = [Some(Positive), Some(Negative), Some(Negative)];
        let truth = [Some("POSITIVE"), Some("POSITIVE"), Some("NEGATIVE")];

        let report = evaluate(&predicted, &truth).unwrap();
        assert_relative_eq!(report.accuracy, 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(report.evaluated, 3);

        let pos = report.class(Positive).unwrap();
        assert_relative_eq!(pos.precision, 1.0);
        assert_relative_eq!(pos.recall, 0.5);
        assert_relative_eq!(pos.f1, 2.0 / 3.0, epsilon = 1e-12);

        let neg = report.class(Negative).unwrap();
        assert_relative_eq!(neg.precision, 0.5);
        assert_relative_eq!(neg.recall, 1.0);
    }

    #[test]
    fn test_absent_class_reports_zero() {
        let predicted = [Some(Positive), Some(Negative)];
        let truth = [Some("POSITIVE"), Some("POSITIVE")];
        let report = evaluate(&predicted, &truth).unwrap();

        let neutral = report.class(Neutral).unwrap();
        assert_eq!(neutral.precision, 0.0);
        assert_eq!(neutral.recall, 0.0);
        assert_eq!(neutral.f1, 0.0);
        assert_eq!(neutral.support, 0);

        let neg = report.class(Negative).unwrap();
        assert_eq!(neg.precision, 0.0);
        assert!(!neg.f1.is_nan());
    }

    #[test]
    fn test_unrecognized_truth_excluded() {
        let predicted = [Some(Positive), Some(Negative), Some(Neutral), None];
        let truth = [Some("POSITIVE"), Some("mixed"), None, Some("NEGATIVE")];
        let report = evaluate(&predicted, &truth).unwrap();

        assert_eq!(report.evaluated, 1);
        assert_eq!(report.confusion().unwrap().total(), 1);
        assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn test_confusion_matrix_sums() {
        let predicted = [
            Some(Positive),
            Some(Neutral),
            Some(Negative),
            Some(Positive),
            Some(Negative),
        ];
        let truth = [
            Some("POSITIVE"),
            Some("POSITIVE"),
            Some("NEGATIVE"),
            Some("NEGATIVE"),
            Some("NEUTRAL"),
        ];
        let report = evaluate(&predicted, &truth).unwrap();
        let cm = report.confusion().unwrap();

        assert_eq!(cm.row_sum(Positive), 2);
        assert_eq!(cm.row_sum(Negative), 2);
        assert_eq!(cm.row_sum(Neutral), 1);
        assert_eq!(cm.total(), 5);
        assert_eq!(cm.get(Positive, Neutral), 1);
        assert_eq!(cm.get(Neutral, Negative), 1);
        assert_eq!(cm.rows()[2], [0, 1, 1]);
    }

    #[test]
    fn test_degraded_when_nothing_recognized() {
        let predicted = [Some(Positive)];
        let truth = [Some("good")];
        let report = evaluate(&predicted, &truth).unwrap();

        assert!(report.is_degraded());
        assert!(report.confusion().is_none());
        assert!(report.summary_lines()[0].contains("detailed metrics unavailable"));
    }

    #[test]
    fn test_length_mismatch() {
        let truth: [Option<&str>; 0] = [];
        assert!(matches!(
            evaluate(&[Some(Positive)], &truth),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_averages() {
        let predicted = [Some(Positive), Some(Positive), Some(Negative)];
        let truth = [Some("POSITIVE"), Some("POSITIVE"), Some("POSITIVE")];
        let report = evaluate(&predicted, &truth).unwrap();
        let EvaluationDetail::Full { macro_avg, weighted_avg, .. } = &report.detail else {
            panic!("expected full detail");
        };
        // positive: p=1, r=2/3; others zero
        assert_relative_eq!(macro_avg.precision, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(weighted_avg.precision, 1.0, epsilon = 1e-12);
        assert_relative_eq!(weighted_avg.recall, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_display_and_report_text() {
        let predicted = [Some(Positive), Some(Negative), Some(Negative)];
        let truth = [Some("POSITIVE"), Some("POSITIVE"), Some("NEGATIVE")];
        let report = evaluate(&predicted, &truth).unwrap();

        assert_eq!(report.confusion().unwrap().display(), "[[1 0 0]\n [0 0 0]\n [1 0 1]]");
        let lines = report.summary_lines();
        assert_eq!(lines[0], "Accuracy: 0.6667");
        assert!(lines[1].contains("NEGATIVE"));
        assert!(lines[2].starts_with("Confusion Matrix"));
    }

    #[test]
    fn test_skipped_summary() {
        assert_eq!(
            Evaluation::Skipped.summary_lines(),
            vec!["Ground-truth labels not found; skipped evaluation metrics."]
        );
        assert!(Evaluation::Skipped.report().is_none());
    }
}
