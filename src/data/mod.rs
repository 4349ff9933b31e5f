//! # Data Module
//!
//! Review records, CSV loading and text preprocessing.

mod loader;
mod preprocessing;
mod review;

pub use loader::{DatasetRow, ReviewDataset, ReviewLoader};
pub use preprocessing::TextPreprocessor;
pub use review::{parse_timestamp, Review};
