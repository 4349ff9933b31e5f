//! Insertion-ordered term counting.

use std::collections::HashMap;

/// Term counts that remember first-seen order for tie-breaking
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    /// (term, count) in first-seen order
    entries: Vec<(String, usize)>,
    /// term -> position in `entries`
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `term`
    pub fn add(&mut self, term: &str) {
        match self.index.get(term) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(term.to_string(), self.entries.len());
                self.entries.push((term.to_string(), 1));
            }
        }
    }

    /// Count every term of an iterator
    pub fn extend<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            self.add(term.as_ref());
        }
    }

    /// Count for a term
    pub fn count(&self, term: &str) -> usize {
        self.index.get(term).map(|&pos| self.entries[pos].1).unwrap_or(0)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was counted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top `n` terms by count descending; equal counts keep first-seen order
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        // stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}
