//! Core data types for extracted answers and the persisted dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One category of one day's puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Publication date, `None` when the date-group carried no parseable date.
    pub date: Option<NaiveDate>,
    /// Trimmed, lowercased category label.
    pub category: String,
    /// Lowercased answer words in published order.
    pub words: Vec<String>,
}

impl AnswerRecord {
    pub fn new(date: Option<NaiveDate>, category: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            date,
            category: category.into(),
            words,
        }
    }
}

/// A record tagged with its row position in the persisted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedRecord {
    pub index: usize,
    #[serde(flatten)]
    pub record: AnswerRecord,
}

/// Aggregate view of a dataset, used for logging and `--json` output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub distinct_dates: usize,
    pub undated: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Structural faults raised while walking the archive markup.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no element with class \"entry-content\" found in page")]
    MissingContainer,

    #[error("\"entry-content\" container has no <ul> list")]
    MissingList,

    #[error("category item {item} of date-group {group} has no bold label")]
    MissingCategoryLabel { group: usize, item: usize },

    #[error("category {category:?} (item {item} of date-group {group}) has no words")]
    EmptyWords {
        group: usize,
        item: usize,
        category: String,
    },
}

/// Faults raised while writing or reading a persisted dataset.
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `row` counts parsed CSV rows from 1, the header being row 1.
    #[error("malformed dataset at row {row}: {reason}")]
    Malformed { row: usize, reason: String },

    #[error("row index not dense: expected {expected}, found {found}")]
    NonDenseIndex { expected: usize, found: usize },
}

pub type DatasetResult<T> = Result<T, DatasetError>;
