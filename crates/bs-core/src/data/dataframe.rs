//! DataFrame implementation for tabular data
//!
//! A DataFrame is a 2-dimensional labeled data structure with columns of
//! potentially different types. Trip partitions are loaded into one, unioned,
//! filtered, and handed to the statistics layer.

use super::*;

use indexmap::IndexMap;

use std::fmt;

/// Main DataFrame structure
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataFrame {
    pub(crate) columns: IndexMap<String, Series>,
    pub(crate) nrows: usize,
}

impl DataFrame {
    /// Create an empty DataFrame
    pub fn new() -> Self {
        Self::default()
    }

    /// Create DataFrame from columns
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Series)>,
        S: Into<String>,
    {
        let mut builder = DataFrameBuilder::new();

        for (name, series) in columns.into_iter() {
            builder = builder.with_column(name, series)?;
        }

        builder.build()
    }

    /// Get the shape of the DataFrame (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.columns.len())
    }

    /// Get the number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Get the number of columns
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    /// Iterate over `(name, series)` pairs in column order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.columns.iter().map(|(name, series)| (name.as_str(), series))
    }

    /// Get a reference to a column
    pub fn get_column(&self, name: &str) -> Option<&Series> {
        self.columns.get(name)
    }

    /// Get a column or fail with `ColumnNotFound`
    pub fn column(&self, name: &str) -> Result<&Series> {
        self.columns
            .get(name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
    }

    /// Check if column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Select specific columns
    pub fn select<I, S>(&self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = DataFrameBuilder::new();

        for name in names.into_iter() {
            let name = name.as_ref();
            builder = builder.with_column(name, self.column(name)?.clone())?;
        }

        let mut selected = builder.build()?;
        selected.nrows = self.nrows;
        Ok(selected)
    }

    /// Filter rows with a boolean mask
    pub fn filter(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.nrows {
            return Err(DataError::DimensionMismatch {
                expected: format!("mask length {}", self.nrows),
                actual: format!("mask length {}", mask.len()),
            });
        }

        let mut builder = DataFrameBuilder::new();

        for (name, series) in &self.columns {
            let filtered = series.filter(mask)?;
            builder = builder.with_column(name.clone(), filtered)?;
        }

        let mut filtered = builder.build()?;
        filtered.nrows = mask.iter().filter(|&&keep| keep).count();
        Ok(filtered)
    }

    /// Rename columns, keeping their position
    pub fn rename<S1, S2>(mut self, mapping: &[(S1, S2)]) -> Result<Self>
    where
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        for (old_name, new_name) in mapping {
            let old_name = old_name.as_ref();
            let new_name = new_name.as_ref();

            if self.columns.contains_key(new_name) {
                return Err(DataError::DuplicateColumn(new_name.to_string()));
            }

            let Some((position, _, series)) = self.columns.shift_remove_full(old_name) else {
                return Err(DataError::ColumnNotFound(old_name.to_string()));
            };
            self.columns
                .shift_insert(position, new_name.to_string(), series);
        }

        Ok(self)
    }

    /// Iterate over rows
    pub fn rows(&self) -> RowIter<'_> {
        RowIter {
            df: self,
            current: 0,
        }
    }

    /// Copy of the rows in `range`, clamped to the row count
    fn clamped_rows(&self, range: std::ops::Range<usize>) -> Self {
        let end = range.end.min(self.nrows);
        let start = range.start.min(end);

        DataFrame {
            columns: self
                .columns
                .iter()
                .map(|(name, series)| (name.clone(), series.clamped_slice(start..end)))
                .collect(),
            nrows: end - start,
        }
    }

    /// Split the rows into consecutive pages of at most `page_size` rows
    pub fn pages(&self, page_size: usize) -> Pages<'_> {
        Pages {
            df: self,
            page_size: page_size.max(1),
            start: 0,
        }
    }

    /// Stack frames vertically, keeping only the columns every frame has
    ///
    /// Column order follows the first frame. Rows keep frame order, then
    /// their original order within each frame.
    pub fn concat_inner(frames: &[DataFrame]) -> Result<Self> {
        let (first, rest) = frames.split_first().ok_or(DataError::NothingToConcat)?;

        let mut builder = DataFrameBuilder::new();

        for (name, series) in &first.columns {
            if !rest.iter().all(|df| df.has_column(name)) {
                continue;
            }

            let mut stacked = series.clone();
            for df in rest {
                stacked = stacked.append(df.column(name)?, name)?;
            }
            builder = builder.with_column(name.clone(), stacked)?;
        }

        let mut unioned = builder.build()?;
        unioned.nrows = frames.iter().map(|df| df.nrows).sum();
        Ok(unioned)
    }

    /// Render the rows as tab separated text with a header line
    pub fn display_rows(&self) -> RowsDisplay<'_> {
        RowsDisplay { df: self }
    }
}

/// Row view into a DataFrame
pub struct Row<'a> {
    df: &'a DataFrame,
    row_idx: usize,
}

impl<'a> Row<'a> {
    /// Position of the row within its DataFrame
    pub fn index(&self) -> usize {
        self.row_idx
    }

    /// Get a value from the row, `None` when missing
    pub fn get(&self, col: &str) -> Result<Option<SeriesValue>> {
        Ok(self.df.column(col)?.get(self.row_idx))
    }

    /// Get value as timestamp
    pub fn get_timestamp(&self, col: &str) -> Result<Option<chrono::NaiveDateTime>> {
        Ok(self.get(col)?.and_then(|v| v.as_timestamp()))
    }

    /// Get value as string
    pub fn get_string(&self, col: &str) -> Result<Option<String>> {
        match self.get(col)? {
            Some(SeriesValue::String(v)) => Ok(Some(v)),
            _ => Ok(None),
        }
    }
}

/// Iterator over rows
pub struct RowIter<'a> {
    df: &'a DataFrame,
    current: usize,
}

impl<'a> Iterator for RowIter<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.df.nrows {
            let row = Row {
                df: self.df,
                row_idx: self.current,
            };
            self.current += 1;
            Some(row)
        } else {
            None
        }
    }
}

/// Iterator over fixed-size row pages
pub struct Pages<'a> {
    df: &'a DataFrame,
    page_size: usize,
    start: usize,
}

impl Iterator for Pages<'_> {
    type Item = DataFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.df.nrows {
            return None;
        }

        let end = (self.start + self.page_size).min(self.df.nrows);
        let page = self.df.clamped_rows(self.start..end);
        self.start = end;
        Some(page)
    }
}

/// Tab separated rendering of a DataFrame's rows
pub struct RowsDisplay<'a> {
    df: &'a DataFrame,
}

impl fmt::Display for RowsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.df.column_names().join("\t"))?;

        for row in self.df.rows() {
            let cells: Vec<String> = self
                .df
                .columns
                .values()
                .map(|series| {
                    series
                        .get(row.index())
                        .map(|v| v.to_string())
                        .unwrap_or_default()
                })
                .collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }

        Ok(())
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataFrame({} rows × {} cols)", self.nrows, self.ncols())
    }
}
