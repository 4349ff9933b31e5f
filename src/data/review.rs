//! # Review Records
//!
//! Input records and timestamp parsing.

use crate::error::{Error, Result};
use crate::sentiment::SentimentLabel;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Accepted naive date-time layouts, tried in order after RFC 3339
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Accepted date-only layouts
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// A customer review
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Review text; `None` excludes the review from all processing
    pub text: Option<String>,
    /// Raw ground-truth label, recognized or not
    pub label: Option<String>,
    /// When the review was written
    pub timestamp: Option<NaiveDateTime>,
}

impl Review {
    /// Create a review with text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Create a review without text
    pub fn absent() -> Self {
        Self::default()
    }

    /// Set the ground-truth label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set timestamp
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set timestamp at midnight of the given day
    pub fn on_date(self, date: NaiveDate) -> Self {
        self.with_timestamp(date.and_time(chrono::NaiveTime::MIN))
    }

    /// Whether the review carries text
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Ground truth, if it is one of the recognized labels
    pub fn ground_truth(&self) -> Option<SentimentLabel> {
        self.label.as_deref().and_then(|l| l.parse().ok())
    }
}

/// Parse a timestamp cell.
///
/// Offsets in RFC 3339 values are kept as local wall-clock time so the
/// calendar day matches what the writer saw.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date.and_time(chrono::NaiveTime::MIN));
        }
    }

    Err(Error::ParseError(format!("unrecognized timestamp '{}'", value)))
}
