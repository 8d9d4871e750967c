//! Series data structure for holding homogeneous data
//!
//! A Series is a one-dimensional, typed column. Trip partitions are stored as
//! one Series per source column.

use super::*;

use chrono::NaiveDateTime;
use ndarray::Array1;

/// A Series is a typed, one-dimensional array of data
///
/// Missing values are NaN in `Float` columns and `None` in `String` and
/// `Timestamp` columns. `Int` columns are always complete.
#[derive(Clone, Debug, PartialEq)]
pub enum Series {
    /// Integer numbers (i64)
    Int(IntArray),
    /// Floating point numbers (f64)
    Float(FloatArray),
    /// Text values
    String(StringArray),
    /// Naive date-times, as written in the source files; `None` is missing
    Timestamp(TimestampArray),
}

impl Series {
    /// Create a new Int series
    pub fn int(data: impl Into<IntArray>) -> Self {
        Series::Int(data.into())
    }

    /// Create a new Float series
    pub fn float(data: impl Into<FloatArray>) -> Self {
        Series::Float(data.into())
    }

    /// Create a new String series
    pub fn string(data: impl Into<StringArray>) -> Self {
        Series::String(data.into())
    }

    /// Create a complete String series from string slices
    pub fn strings<T: AsRef<str>>(data: &[T]) -> Self {
        Series::String(data.iter().map(|s| Some(s.as_ref().to_string())).collect())
    }

    /// Create a complete Timestamp series
    pub fn timestamp(data: impl IntoIterator<Item = NaiveDateTime>) -> Self {
        Series::Timestamp(data.into_iter().map(Some).collect())
    }

    /// Create a Timestamp series with missing values
    pub fn nullable_timestamp(data: impl Into<TimestampArray>) -> Self {
        Series::Timestamp(data.into())
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        match self {
            Series::Int(arr) => arr.len(),
            Series::Float(arr) => arr.len(),
            Series::String(arr) => arr.len(),
            Series::Timestamp(arr) => arr.len(),
        }
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the type name of the series
    pub fn dtype(&self) -> &'static str {
        self.column_type().name()
    }

    /// Get the storage type of the series
    pub fn column_type(&self) -> ColumnType {
        match self {
            Series::Int(_) => ColumnType::Int,
            Series::Float(_) => ColumnType::Float,
            Series::String(_) => ColumnType::String,
            Series::Timestamp(_) => ColumnType::Timestamp,
        }
    }

    /// Get a value at index, `None` when out of bounds or missing
    pub fn get(&self, idx: usize) -> Option<SeriesValue> {
        match self {
            Series::Int(arr) => arr.get(idx).map(|&v| SeriesValue::Int(v)),
            Series::Float(arr) => arr
                .get(idx)
                .filter(|v| !v.is_nan())
                .map(|&v| SeriesValue::Float(v)),
            Series::String(arr) => arr
                .get(idx)
                .and_then(|v| v.as_ref())
                .map(|v| SeriesValue::String(v.clone())),
            Series::Timestamp(arr) => arr.get(idx).and_then(|v| *v).map(SeriesValue::Timestamp),
        }
    }

    /// Number of non-missing values
    pub fn count(&self) -> usize {
        match self {
            Series::Float(arr) => arr.iter().filter(|v| !v.is_nan()).count(),
            Series::String(arr) => arr.iter().filter(|v| v.is_some()).count(),
            Series::Timestamp(arr) => arr.iter().filter(|v| v.is_some()).count(),
            Series::Int(_) => self.len(),
        }
    }

    /// Copy of the rows in `range`, clamped to the series length
    pub(crate) fn clamped_slice(&self, range: std::ops::Range<usize>) -> Self {
        let end = range.end.min(self.len());
        let start = range.start.min(end);

        match self {
            Series::Int(arr) => Series::Int(arr.slice(ndarray::s![start..end]).to_owned()),
            Series::Float(arr) => Series::Float(arr.slice(ndarray::s![start..end]).to_owned()),
            Series::String(arr) => Series::String(arr[start..end].to_vec()),
            Series::Timestamp(arr) => {
                Series::Timestamp(arr.slice(ndarray::s![start..end]).to_owned())
            }
        }
    }

    /// Filter the series with a boolean mask
    pub fn filter(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.len() {
            return Err(DataError::DimensionMismatch {
                expected: format!("mask length {}", self.len()),
                actual: format!("mask length {}", mask.len()),
            });
        }

        match self {
            Series::Int(arr) => Ok(Series::Int(masked(arr.iter(), mask).collect())),
            Series::Float(arr) => Ok(Series::Float(masked(arr.iter(), mask).collect())),
            Series::String(arr) => Ok(Series::String(masked(arr.iter(), mask).collect())),
            Series::Timestamp(arr) => Ok(Series::Timestamp(masked(arr.iter(), mask).collect())),
        }
    }

    /// Append `other` below this series
    ///
    /// `Int` and `Float` columns widen to `Float`; any other pairing of
    /// different types is rejected. `column` names the column for errors.
    pub fn append(&self, other: &Series, column: &str) -> Result<Self> {
        match (self, other) {
            (Series::Int(a), Series::Int(b)) => Ok(Series::Int(chain(a, b))),
            (Series::Float(a), Series::Float(b)) => Ok(Series::Float(chain(a, b))),
            (Series::Timestamp(a), Series::Timestamp(b)) => Ok(Series::Timestamp(chain(a, b))),
            (Series::String(a), Series::String(b)) => {
                Ok(Series::String(a.iter().chain(b.iter()).cloned().collect()))
            }
            (Series::Int(_), Series::Float(_)) | (Series::Float(_), Series::Int(_)) => {
                self.to_float()?.append(&other.to_float()?, column)
            }
            _ => Err(DataError::TypeMismatch {
                column: column.to_string(),
                expected: self.dtype(),
                actual: other.dtype(),
            }),
        }
    }

    /// Convert to float series if possible
    pub fn to_float(&self) -> Result<Series> {
        match self {
            Series::Float(arr) => Ok(Series::Float(arr.clone())),
            Series::Int(arr) => Ok(Series::Float(arr.iter().map(|&v| v as f64).collect())),
            Series::String(_) | Series::Timestamp(_) => Err(DataError::TypeMismatch {
                column: String::new(),
                expected: "float64",
                actual: self.dtype(),
            }),
        }
    }

    /// Timestamp values, `None` where missing, if this is a Timestamp series
    pub fn as_timestamps(&self) -> Option<&TimestampArray> {
        match self {
            Series::Timestamp(arr) => Some(arr),
            _ => None,
        }
    }
}

fn masked<'a, T: Clone + 'a>(
    values: impl Iterator<Item = &'a T> + 'a,
    mask: &'a [bool],
) -> impl Iterator<Item = T> + 'a {
    values
        .zip(mask.iter())
        .filter(|(_, keep)| **keep)
        .map(|(val, _)| val.clone())
}

fn chain<T: Clone>(a: &Array1<T>, b: &Array1<T>) -> Array1<T> {
    a.iter().chain(b.iter()).cloned().collect()
}

/// Enum for type-safe value access
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesValue {
    Int(i64),
    Float(f64),
    String(String),
    Timestamp(NaiveDateTime),
}

impl SeriesValue {
    /// Get the timestamp, if this value is one
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            SeriesValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl std::fmt::Display for SeriesValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesValue::Int(v) => write!(f, "{}", v),
            SeriesValue::Float(v) => write!(f, "{}", v),
            SeriesValue::String(v) => write!(f, "{}", v),
            SeriesValue::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}
