//! Statistical structures for column summaries

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use super::Category;

/// Frequency extremes of a categorical column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalStats {
    /// Value with the highest count
    pub most_popular: Category,
    /// Count of `most_popular`
    pub freq_most_popular: usize,
    /// Value with the lowest count, distinct from `most_popular` when the
    /// column has more than one value
    pub least_popular: Category,
    /// Count of `least_popular`
    pub freq_least_popular: usize,
    /// Number of distinct values
    pub value_count: usize,
}

/// Summary of a numeric duration column, in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumericStats {
    pub max: i64,
    /// Mean truncated toward zero
    pub mean: i64,
    pub min: i64,
}

/// Calendar breakdown derived from a timestamp column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePart {
    /// Full month name
    Month,
    /// Full weekday name
    Day,
    /// Hour of day, 0-23
    Hour,
}

impl TimePart {
    pub const ALL: [TimePart; 3] = [TimePart::Month, TimePart::Day, TimePart::Hour];

    /// Key of the breakdown in serialized output
    pub fn name(&self) -> &'static str {
        match self {
            TimePart::Month => "month",
            TimePart::Day => "day",
            TimePart::Hour => "hour",
        }
    }
}

impl fmt::Display for TimePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Month, day and hour breakdowns of a timestamp column
///
/// A breakdown with a single distinct value is left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimestampStats {
    pub parts: IndexMap<TimePart, CategoricalStats>,
}

impl TimestampStats {
    /// Get one breakdown
    pub fn get(&self, part: TimePart) -> Option<&CategoricalStats> {
        self.parts.get(&part)
    }

    /// Check if every breakdown was single-valued
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
