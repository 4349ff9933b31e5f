//! # Sentiment Aggregator
//!
//! Reduces a batch of per-review results into a label distribution and a
//! daily mean-polarity trend.

use super::analyzer::{SentimentLabel, SentimentResult};
use crate::defaults;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Label counts over a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentimentDistribution {
    counts: BTreeMap<SentimentLabel, usize>,
}

impl SentimentDistribution {
    /// Tally labels
    pub fn from_labels<I: IntoIterator<Item = SentimentLabel>>(labels: I) -> Self {
        let mut counts = BTreeMap::new();
        for label in labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Count for one label (zero when unseen)
    pub fn get(&self, label: SentimentLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Whether no label was counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Labels that occurred, in label order
    pub fn iter(&self) -> impl Iterator<Item = (SentimentLabel, usize)> + '_ {
        self.counts.iter().map(|(label, count)| (*label, *count))
    }

    /// Labels that occurred, most frequent first
    pub fn most_common(&self) -> Vec<(SentimentLabel, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// Share of the batch carrying `label`
    pub fn fraction(&self, label: SentimentLabel) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(label) as f64 / total as f64
        }
    }
}

/// One day of the trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Calendar day
    pub date: NaiveDate,
    /// Mean polarity of the day's reviews, 0.0 when there were none
    pub mean_polarity: f64,
    /// Number of reviews that day
    pub count: usize,
}

/// Daily mean-polarity series without gaps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Resample dated polarities to daily means covering every day from
    /// the earliest to the latest date.
    pub fn from_daily<I: IntoIterator<Item = (NaiveDate, f64)>>(values: I) -> Self {
        let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
        for (date, polarity) in values {
            let bucket = buckets.entry(date).or_insert((0.0, 0));
            bucket.0 += polarity;
            bucket.1 += 1;
        }

        let (first, last) = match (buckets.keys().next(), buckets.keys().next_back()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Self::default(),
        };

        let points = first
            .iter_days()
            .take_while(|day| *day <= last)
            .map(|date| match buckets.get(&date) {
                Some((sum, count)) => TrendPoint {
                    date,
                    mean_polarity: sum / *count as f64,
                    count: *count,
                },
                None => TrendPoint {
                    date,
                    mean_polarity: 0.0,
                    count: 0,
                },
            })
            .collect();

        Self { points }
    }

    /// Number of days covered
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in date order
    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    /// Iterate points in date order
    pub fn iter(&self) -> std::slice::Iter<'_, TrendPoint> {
        self.points.iter()
    }

    /// Look up a day
    pub fn get(&self, date: NaiveDate) -> Option<&TrendPoint> {
        let first = self.points.first()?.date;
        let offset = (date - first).num_days();
        if offset < 0 {
            return None;
        }
        self.points.get(offset as usize)
    }
}

/// Per-review input to aggregation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentRecord {
    /// Sentiment, absent when scoring failed
    pub result: Option<SentimentResult>,
    /// Review time, if known
    pub timestamp: Option<NaiveDateTime>,
}

/// Batch reducer for sentiment results
#[derive(Debug, Clone)]
pub struct SentimentAggregator {
    /// First day assigned when timestamps are synthesized
    trend_epoch: NaiveDate,
}

impl Default for SentimentAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAggregator {
    /// Create an aggregator with the default synthesis epoch
    pub fn new() -> Self {
        Self {
            trend_epoch: defaults::trend_epoch(),
        }
    }

    /// Set the epoch used for synthesized timestamps
    pub fn with_epoch(mut self, epoch: NaiveDate) -> Self {
        self.trend_epoch = epoch;
        self
    }

    /// Label distribution over records with a result
    pub fn distribution(&self, records: &[SentimentRecord]) -> SentimentDistribution {
        SentimentDistribution::from_labels(records.iter().filter_map(|r| r.result.map(|s| s.label)))
    }

    /// Daily trend.
    ///
    /// When no record has a timestamp, record `i` is placed on
    /// `epoch + i days`. Otherwise records without a timestamp are left
    /// out of the trend.
    pub fn trend(&self, records: &[SentimentRecord]) -> TrendSeries {
        let synthesize = records.iter().all(|r| r.timestamp.is_none());
        if synthesize {
            debug!(epoch = %self.trend_epoch, "No timestamps supplied, synthesizing daily dates");
        } else {
            let undated = records.iter().filter(|r| r.timestamp.is_none()).count();
            if undated > 0 {
                warn!(undated, "Reviews without a timestamp are left out of the trend");
            }
        }

        let dated = records.iter().enumerate().filter_map(|(i, record)| {
            let result = record.result?;
            let date = if synthesize {
                self.trend_epoch + Duration::days(i as i64)
            } else {
                record.timestamp?.date()
            };
            Some((date, result.polarity))
        });

        TrendSeries::from_daily(dated)
    }

    /// Distribution and trend in one call
    pub fn aggregate(&self, records: &[SentimentRecord]) -> (SentimentDistribution, TrendSeries) {
        (self.distribution(records), self.trend(records))
    }
}
