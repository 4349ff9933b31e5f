//! # Evaluation Module
//!
//! Optional comparison of predicted labels with ground truth.

mod metrics;

pub use metrics::{
    evaluate, AverageMetrics, ClassMetrics, ConfusionMatrix, Evaluation, EvaluationDetail,
    EvaluationReport,
};
