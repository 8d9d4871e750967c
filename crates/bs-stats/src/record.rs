//! Statistics records produced by the aggregator
//!
//! A [`StatisticsRecord`] maps each summarized column to a record whose shape
//! depends on how the column was classified.

use indexmap::IndexMap;
use serde::Serialize;

pub use category::Category;
pub use statistics::{CategoricalStats, NumericStats, TimePart, TimestampStats};

pub mod category;
pub mod statistics;

/// Per-column summary, shaped by the column's [`crate::classify::StatKind`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnStats {
    Categorical(CategoricalStats),
    Numeric(NumericStats),
    Timestamp(TimestampStats),
}

impl ColumnStats {
    /// Get the categorical summary, if this is one
    pub fn as_categorical(&self) -> Option<&CategoricalStats> {
        match self {
            ColumnStats::Categorical(stats) => Some(stats),
            _ => None,
        }
    }

    /// Get the numeric summary, if this is one
    pub fn as_numeric(&self) -> Option<&NumericStats> {
        match self {
            ColumnStats::Numeric(stats) => Some(stats),
            _ => None,
        }
    }

    /// Get the timestamp breakdowns, if this is one
    pub fn as_timestamp(&self) -> Option<&TimestampStats> {
        match self {
            ColumnStats::Timestamp(stats) => Some(stats),
            _ => None,
        }
    }
}

/// A column left out of the record, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OmittedColumn {
    pub column: String,
    pub reason: String,
}

/// Statistics for every summarized column of a table
///
/// Serializes as a map keyed by column name, in table column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatisticsRecord {
    #[serde(flatten)]
    pub columns: IndexMap<String, ColumnStats>,
    /// Classified columns that produced no statistics
    #[serde(skip)]
    pub omitted: Vec<OmittedColumn>,
}

impl StatisticsRecord {
    /// Get the statistics of a column
    pub fn get(&self, column: &str) -> Option<&ColumnStats> {
        self.columns.get(column)
    }

    /// Check if a column was summarized
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Summarized column names, in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    /// Check if no column was summarized
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
