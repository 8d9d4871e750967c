//! Group keys for frequency tables

use std::fmt;

use bs_core::data::SeriesValue;
use bs_core::source::TIMESTAMP_FORMAT;
use serde::Serialize;

/// A value counted in a frequency table
///
/// Integers sort before text; text sorts lexicographically. Whole-valued
/// floats (a birth year read as `1989.0`) become integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Category {
    Int(i64),
    Text(String),
}

impl From<SeriesValue> for Category {
    fn from(value: SeriesValue) -> Self {
        match value {
            SeriesValue::Int(v) => Category::Int(v),
            SeriesValue::Float(v)
                if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 =>
            {
                Category::Int(v as i64)
            }
            SeriesValue::Float(v) => Category::Text(v.to_string()),
            SeriesValue::String(v) => Category::Text(v),
            SeriesValue::Timestamp(v) => Category::Text(v.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::Text(value.to_string())
    }
}

impl From<i64> for Category {
    fn from(value: i64) -> Self {
        Category::Int(value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Int(v) => write!(f, "{}", v),
            Category::Text(v) => f.write_str(v),
        }
    }
}
