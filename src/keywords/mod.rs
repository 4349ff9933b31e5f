//! # Keywords Module
//!
//! Per-review keyword extraction and corpus-level themes.

mod extractor;
mod frequency;
mod themes;

pub use extractor::{is_stop_word, KeywordExtractor, STOP_WORDS};
pub use frequency::FrequencyTable;
pub use themes::{Theme, ThemeCounter};
