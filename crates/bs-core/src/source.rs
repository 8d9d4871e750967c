//! Partition sources
//!
//! A [`PartitionSource`] hands out one region's trip records as a DataFrame
//! typed by the fixed column contract in [`crate::schema`].

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::debug;

use crate::data::{ColumnType, DataError, DataFrame, DataFrameBuilder, Series};
use crate::schema;
use crate::selector::Region;

/// Timestamp layout of the source files; fractional seconds are optional
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Errors raised while reading a partition
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No source partition for region '{region}' at {location}")]
    MissingSourcePartition { region: Region, location: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Cannot parse '{value}' in column '{column}' (line {line}) as {expected}")]
    Parse {
        column: String,
        line: u64,
        value: String,
        expected: &'static str,
    },

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Result type for source operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Read access to region partitions
pub trait PartitionSource {
    /// Load every record of one region
    fn read_partition(&self, region: Region) -> Result<DataFrame>;
}

/// Partitions stored as `<dir>/<region key>.csv`
#[derive(Debug, Clone)]
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    /// Create a source reading partitions from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File a region is read from
    pub fn partition_path(&self, region: Region) -> PathBuf {
        self.dir.join(format!("{}.csv", region.key()))
    }
}

impl PartitionSource for CsvSource {
    fn read_partition(&self, region: Region) -> Result<DataFrame> {
        let path = self.partition_path(region);

        let file = File::open(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => SourceError::MissingSourcePartition {
                region,
                location: path.display().to_string(),
            },
            _ => SourceError::Io {
                path: path.clone(),
                source,
            },
        })?;

        let df = read_csv(file, &path)?;
        debug!(%region, path = %path.display(), rows = df.nrows(), "read partition");
        Ok(df)
    }
}

/// Parse CSV trip records from any reader
pub fn read_csv<R: io::Read>(reader: R, path: &Path) -> Result<DataFrame> {
    let csv_error = |source| SourceError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let names: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(schema::column_name)
        .collect();

    let mut buffers: Vec<ColumnBuffer> = names
        .iter()
        .map(|name| ColumnBuffer::new(schema::column_type(name)))
        .collect();

    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        for ((buffer, name), value) in buffers.iter_mut().zip(&names).zip(record.iter()) {
            buffer.push(value, name, line)?;
        }
    }

    let mut builder = DataFrameBuilder::new();
    for (name, buffer) in names.into_iter().zip(buffers) {
        builder = builder.with_column(name, buffer.into_series())?;
    }

    Ok(builder.build()?)
}

/// Growable storage for one column while reading
enum ColumnBuffer {
    Int(Vec<i64>),
    Float(Vec<f64>),
    String(Vec<Option<String>>),
    Timestamp(Vec<Option<NaiveDateTime>>),
}

impl ColumnBuffer {
    fn new(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Int => ColumnBuffer::Int(Vec::new()),
            ColumnType::Float => ColumnBuffer::Float(Vec::new()),
            ColumnType::String => ColumnBuffer::String(Vec::new()),
            ColumnType::Timestamp => ColumnBuffer::Timestamp(Vec::new()),
        }
    }

    fn push(&mut self, value: &str, column: &str, line: u64) -> Result<()> {
        let parse_error = |expected| SourceError::Parse {
            column: column.to_string(),
            line,
            value: value.to_string(),
            expected,
        };

        match self {
            ColumnBuffer::Int(values) => {
                values.push(value.parse().map_err(|_| parse_error("int64"))?);
            }
            ColumnBuffer::Float(values) if value.is_empty() => values.push(f64::NAN),
            ColumnBuffer::Float(values) => {
                values.push(value.parse().map_err(|_| parse_error("float64"))?);
            }
            ColumnBuffer::String(values) if value.is_empty() => values.push(None),
            ColumnBuffer::String(values) => values.push(Some(value.to_string())),
            ColumnBuffer::Timestamp(values) if value.is_empty() => values.push(None),
            ColumnBuffer::Timestamp(values) => {
                let ts = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
                    .map_err(|_| parse_error("datetime"))?;
                values.push(Some(ts));
            }
        }
        Ok(())
    }

    fn into_series(self) -> Series {
        match self {
            ColumnBuffer::Int(values) => Series::int(values),
            ColumnBuffer::Float(values) => Series::float(values),
            ColumnBuffer::String(values) => Series::string(values),
            ColumnBuffer::Timestamp(values) => Series::nullable_timestamp(values),
        }
    }
}

/// In-memory partitions, for tests and embedding callers
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    partitions: HashMap<Region, DataFrame>,
}

impl MemorySource {
    /// Create a source with no partitions
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the partition of a region
    pub fn with_partition(mut self, region: Region, df: DataFrame) -> Self {
        self.partitions.insert(region, df);
        self
    }
}

impl PartitionSource for MemorySource {
    fn read_partition(&self, region: Region) -> Result<DataFrame> {
        self.partitions
            .get(&region)
            .cloned()
            .ok_or_else(|| SourceError::MissingSourcePartition {
                region,
                location: "memory".to_string(),
            })
    }
}
