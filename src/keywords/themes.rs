//! # Theme Counter
//!
//! Corpus-wide ranking of per-review keywords.

use super::frequency::FrequencyTable;
use serde::{Deserialize, Serialize};

/// A frequently occurring keyword across the batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Keyword
    pub term: String,
    /// Number of reviews listing the keyword
    pub count: usize,
}

/// Accumulates keyword lists in batch order
#[derive(Debug, Clone, Default)]
pub struct ThemeCounter {
    table: FrequencyTable,
    reviews: usize,
}

impl ThemeCounter {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one review's keywords
    pub fn add(&mut self, keywords: &[String]) {
        self.table.extend(keywords);
        self.reviews += 1;
    }

    /// Number of keyword lists added
    pub fn review_count(&self) -> usize {
        self.reviews
    }

    /// Top `n` themes; ties keep first-seen order across the batch
    pub fn top(&self, n: usize) -> Vec<Theme> {
        self.table
            .most_common(n)
            .into_iter()
            .map(|(term, count)| Theme { term, count })
            .collect()
    }
}

impl<'a> FromIterator<&'a [String]> for ThemeCounter {
    fn from_iter<I: IntoIterator<Item = &'a [String]>>(iter: I) -> Self {
        let mut counter = ThemeCounter::new();
        for keywords in iter {
            counter.add(keywords);
        }
        counter
    }
}
