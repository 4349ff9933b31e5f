//! # Review Loader
//!
//! Loads reviews from a headed CSV file.

use super::review::{parse_timestamp, Review};
use crate::error::{Error, Result};
use crate::utils::config::InputSettings;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Cell values read as missing
const NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "NULL", "null", "None", "#N/A",
];

fn non_null(cell: &str) -> Option<&str> {
    if NULL_MARKERS.contains(&cell) {
        None
    } else {
        Some(cell)
    }
}

/// One CSV row: raw fields plus the parsed review
#[derive(Debug, Clone)]
pub struct DatasetRow {
    /// Original cell values in header order
    pub fields: Vec<String>,
    /// Parsed review
    pub review: Review,
}

/// A loaded CSV file
#[derive(Debug, Clone)]
pub struct ReviewDataset {
    /// Header row
    pub headers: Vec<String>,
    /// Data rows in file order
    pub rows: Vec<DatasetRow>,
    /// Whether a ground-truth column was present
    pub has_label_column: bool,
    /// Whether a timestamp column was present
    pub has_timestamp_column: bool,
}

impl ReviewDataset {
    /// Reviews in file order
    pub fn reviews(&self) -> Vec<Review> {
        self.rows.iter().map(|row| row.review.clone()).collect()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// CSV loader for review datasets
#[derive(Debug, Clone, Default)]
pub struct ReviewLoader {
    settings: InputSettings,
}

impl ReviewLoader {
    /// Create a loader for the given column names
    pub fn new(settings: InputSettings) -> Self {
        Self { settings }
    }

    /// Load a dataset from a CSV file
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<ReviewDataset> {
        let file = File::open(path.as_ref())?;
        info!("Loading reviews from {}", path.as_ref().display());
        self.load_reader(file)
    }

    /// Load a dataset from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<ReviewDataset> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

        let position = |name: &str| headers.iter().position(|h| h == name);
        let text_idx = position(&self.settings.text_column)
            .ok_or_else(|| Error::MissingColumn(self.settings.text_column.clone()))?;
        let label_idx = position(&self.settings.label_column);
        let timestamp_idx = position(&self.settings.timestamp_column);

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let review = Self::parse_row(&record, text_idx, label_idx, timestamp_idx)
                .map_err(|e| match e {
                    Error::ParseError(msg) => {
                        Error::ParseError(format!("row {}: {}", line + 1, msg))
                    }
                    other => other,
                })?;
            rows.push(DatasetRow {
                fields: record.iter().map(String::from).collect(),
                review,
            });
        }

        debug!(
            rows = rows.len(),
            label_column = label_idx.is_some(),
            timestamp_column = timestamp_idx.is_some(),
            "Parsed review dataset"
        );

        Ok(ReviewDataset {
            headers,
            rows,
            has_label_column: label_idx.is_some(),
            has_timestamp_column: timestamp_idx.is_some(),
        })
    }

    fn parse_row(
        record: &StringRecord,
        text_idx: usize,
        label_idx: Option<usize>,
        timestamp_idx: Option<usize>,
    ) -> Result<Review> {
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).and_then(non_null);

        let timestamp = cell(timestamp_idx).map(parse_timestamp).transpose()?;

        Ok(Review {
            text: cell(Some(text_idx)).map(String::from),
            label: cell(label_idx).map(String::from),
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn loader() -> ReviewLoader {
        ReviewLoader::new(InputSettings::default())
    }

    #[test]
    fn test_missing_text_column_is_fatal() {
        let csv = "Comment,label\nnice,POSITIVE\n";
        let err = loader().load_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "Review"));
    }

    #[test]
    fn test_null_cells_become_absent() {
        let csv = "Review,label\ngood product,POSITIVE\n,NEGATIVE\nNaN,\n";
        let dataset = loader().load_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert!(dataset.has_label_column);
        assert!(!dataset.has_timestamp_column);
        assert_eq!(dataset.rows[0].review.text.as_deref(), Some("good product"));
        assert!(dataset.rows[1].review.text.is_none());
        assert!(dataset.rows[2].review.text.is_none());
        assert!(dataset.rows[2].review.label.is_none());
    }

    #[test]
    fn test_whitespace_text_is_kept() {
        let csv = "Review,label\n\"   \",NEGATIVE\n";
        let dataset = loader().load_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.rows[0].review.text.as_deref(), Some("   "));
        assert!(dataset.rows[0].review.has_text());
    }

    #[test]
    fn test_labels_are_not_trimmed() {
        let csv = "Review,label\ngood,\" POSITIVE \"\nfine,NEUTRAL\n";
        let dataset = loader().load_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.rows[0].review.label.as_deref(), Some(" POSITIVE "));
        assert_eq!(dataset.rows[0].review.ground_truth(), None);
        assert_eq!(
            dataset.rows[1].review.ground_truth(),
            Some(crate::sentiment::SentimentLabel::Neutral)
        );
    }

    #[test]
    fn test_timestamps_are_parsed() {
        let csv = "id,Review,timestamp\n1,fine,2025-02-01\n2,ok,\n";
        let dataset = loader().load_reader(csv.as_bytes()).unwrap();
        assert!(dataset.has_timestamp_column);
        assert!(dataset.rows[0].review.timestamp.is_some());
        assert!(dataset.rows[1].review.timestamp.is_none());
        assert_eq!(dataset.rows[0].fields, vec!["1", "fine", "2025-02-01"]);
    }

    #[test]
    fn test_bad_timestamp_reports_row() {
        let csv = "Review,timestamp\nfine,2025-02-01\nok,someday\n";
        let err = loader().load_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Review,label").unwrap();
        writeln!(file, "\"Great, fast delivery\",POSITIVE").unwrap();

        let dataset = loader().load_path(&path).unwrap();
        assert_eq!(
            dataset.reviews()[0].text.as_deref(),
            Some("Great, fast delivery")
        );
    }
}
