//! Data operations for DataFrames

use super::*;

use chrono::NaiveDateTime;

/// Filter operation
///
/// Predicates accumulate into a single row mask; `execute` materializes the
/// surviving rows into a new DataFrame and leaves the source untouched.
pub struct Filter<'a> {
    df: &'a DataFrame,
    mask: Vec<bool>,
}

impl<'a> Filter<'a> {
    /// Create a new filter operation
    pub fn new(df: &'a DataFrame) -> Self {
        Self {
            df,
            mask: vec![true; df.nrows()],
        }
    }

    /// Filter by a predicate over a Timestamp column
    ///
    /// Rows with a missing timestamp never pass.
    pub fn by_timestamp<F>(mut self, col: &str, predicate: F) -> Result<Self>
    where
        F: Fn(NaiveDateTime) -> bool,
    {
        let series = self.df.column(col)?;
        let values = series.as_timestamps().ok_or_else(|| DataError::TypeMismatch {
            column: col.to_string(),
            expected: ColumnType::Timestamp.name(),
            actual: series.dtype(),
        })?;

        for (keep, ts) in self.mask.iter_mut().zip(values.iter()) {
            if *keep && !ts.is_some_and(|ts| predicate(ts)) {
                *keep = false;
            }
        }
        Ok(self)
    }

    /// Number of rows currently kept
    pub fn kept(&self) -> usize {
        self.mask.iter().filter(|keep| **keep).count()
    }

    /// Execute the filter
    pub fn execute(self) -> Result<DataFrame> {
        self.df.filter(&self.mask)
    }
}
