//! Column classification
//!
//! Picks the summary strategy for a column from its name and storage type.

use bs_core::data::ColumnType;
use bs_core::schema::{AGE_GROUP, END_TIME, START_TIME, TRIP_DURATION};
use serde::Serialize;

/// How a column is summarized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    /// Frequency table of values
    Categorical,
    /// Max, truncated mean and min
    NumericDuration,
    /// Month, day and hour frequency tables
    Timestamp,
}

/// Classify a column; `None` means the column is not summarized
///
/// `age_group` holds numeric birth years but is counted like a category.
/// Columns that are neither named nor text typed, such as the row index, are
/// skipped.
pub fn classify(name: &str, dtype: ColumnType) -> Option<StatKind> {
    match name {
        START_TIME | END_TIME => Some(StatKind::Timestamp),
        TRIP_DURATION => Some(StatKind::NumericDuration),
        AGE_GROUP => Some(StatKind::Categorical),
        _ if dtype.is_string() => Some(StatKind::Categorical),
        _ => None,
    }
}
