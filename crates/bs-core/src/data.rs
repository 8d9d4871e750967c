//! Core data structures for BikeStat
//!
//! This module provides the in-memory column store that trip partitions are
//! loaded into, filtered, and summarized from.

mod builder;
mod dataframe;
mod ops;
mod series;
mod utils;

#[cfg(test)]
mod tests;

// Re-exports
pub use builder::DataFrameBuilder;
pub use dataframe::{DataFrame, Row};
pub use ops::Filter;
pub use series::{Series, SeriesValue};
pub use utils::ColumnType;

// Type aliases for common use cases
pub type FloatArray = ndarray::Array1<f64>;
pub type IntArray = ndarray::Array1<i64>;
pub type TimestampArray = ndarray::Array1<Option<chrono::NaiveDateTime>>;
pub type StringArray = Vec<Option<String>>;

/// Error types specific to data operations
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Invalid column type for '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Cannot concatenate an empty list of tables")]
    NothingToConcat,
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
