//! Per-column statistics
//!
//! This module turns a filtered trip table into a [`StatisticsRecord`]:
//! - categorical columns: most and least frequent values
//! - `trip_duration`: max, truncated mean and min
//! - timestamps: frequency tables of the derived month, weekday and hour
//!
//! Columns with nothing to summarize are listed in the record's `omitted`
//! list instead of failing the whole pass.

use std::collections::BTreeMap;

use bs_core::data::{DataError, DataFrame, Series};
use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, warn};

use crate::Result;
use crate::classify::{StatKind, classify};
use crate::error::StatsError;
use crate::record::{
    CategoricalStats, Category, ColumnStats, NumericStats, OmittedColumn, StatisticsRecord,
    TimePart, TimestampStats,
};

#[cfg(test)]
mod tests;

/// Summarize every classified column of a table
pub fn aggregate(df: &DataFrame) -> Result<StatisticsRecord> {
    let mut record = StatisticsRecord::default();

    for (name, series) in df.columns() {
        let Some(kind) = classify(name, series.column_type()) else {
            debug!(column = name, dtype = series.dtype(), "column not summarized");
            continue;
        };

        match summarize(name, series, kind) {
            Ok(stats) => {
                record.columns.insert(name.to_string(), stats);
            }
            Err(err @ StatsError::EmptyColumn(_)) => {
                warn!(column = name, "{err}");
                record.omitted.push(OmittedColumn {
                    column: name.to_string(),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        columns = record.columns.len(),
        omitted = record.omitted.len(),
        rows = df.nrows(),
        "aggregated statistics"
    );
    Ok(record)
}

/// Summarize one column with the strategy for its kind
pub fn summarize(name: &str, series: &Series, kind: StatKind) -> Result<ColumnStats> {
    match kind {
        StatKind::Categorical => categorical(name, values(series)).map(ColumnStats::Categorical),
        StatKind::NumericDuration => numeric_duration(name, series).map(ColumnStats::Numeric),
        StatKind::Timestamp => timestamp(name, series).map(ColumnStats::Timestamp),
    }
}

/// Non-missing values of a series as group keys
fn values(series: &Series) -> impl Iterator<Item = Category> + '_ {
    (0..series.len()).filter_map(|i| series.get(i).map(Category::from))
}

/// Frequency extremes of a stream of group keys
///
/// Groups are visited in ascending key order. `most_popular` is the first
/// group with the highest count; `least_popular` is the first group with the
/// lowest count other than `most_popular`, so both name the same value only
/// when there is a single group.
pub fn categorical<I>(name: &str, values: I) -> Result<CategoricalStats>
where
    I: IntoIterator<Item = Category>,
{
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut most: Option<(&Category, usize)> = None;
    for (key, &count) in &counts {
        if most.is_none_or(|(_, best)| count > best) {
            most = Some((key, count));
        }
    }
    let Some((most_popular, freq_most_popular)) = most else {
        return Err(StatsError::EmptyColumn(name.to_string()));
    };

    let mut least = (most_popular, freq_most_popular);
    let mut found_other = false;
    for (key, &count) in &counts {
        if key == most_popular {
            continue;
        }
        if !found_other || count < least.1 {
            least = (key, count);
            found_other = true;
        }
    }

    Ok(CategoricalStats {
        most_popular: most_popular.clone(),
        freq_most_popular,
        least_popular: least.0.clone(),
        freq_least_popular: least.1,
        value_count: counts.len(),
    })
}

/// Max, truncated mean and min of a numeric column, skipping missing values
pub fn numeric_duration(name: &str, series: &Series) -> Result<NumericStats> {
    let present: Vec<f64> = match series {
        Series::Float(values) => values.iter().copied().filter(|v| !v.is_nan()).collect(),
        Series::Int(values) => values.iter().map(|&v| v as f64).collect(),
        Series::String(_) | Series::Timestamp(_) => {
            return Err(DataError::TypeMismatch {
                column: name.to_string(),
                expected: "numeric",
                actual: series.dtype(),
            }
            .into());
        }
    };

    if present.is_empty() {
        return Err(StatsError::EmptyColumn(name.to_string()));
    }

    let max = present.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let min = present.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let mean = present.iter().sum::<f64>() / present.len() as f64;

    Ok(NumericStats {
        max: max as i64,
        mean: mean.trunc() as i64,
        min: min as i64,
    })
}

/// Month, day and hour frequency tables of a timestamp column, skipping
/// missing values
pub fn timestamp(name: &str, series: &Series) -> Result<TimestampStats> {
    let values: Vec<NaiveDateTime> = series
        .as_timestamps()
        .ok_or_else(|| DataError::TypeMismatch {
            column: name.to_string(),
            expected: "datetime",
            actual: series.dtype(),
        })?
        .iter()
        .flatten()
        .copied()
        .collect();

    if values.is_empty() {
        return Err(StatsError::EmptyColumn(name.to_string()));
    }

    let mut stats = TimestampStats::default();
    for part in TimePart::ALL {
        let breakdown = categorical(name, values.iter().map(|&ts| time_part(ts, part)))?;

        if breakdown.value_count == 1 {
            debug!(column = name, %part, "single-valued breakdown skipped");
            continue;
        }
        stats.parts.insert(part, breakdown);
    }

    Ok(stats)
}

fn time_part(ts: NaiveDateTime, part: TimePart) -> Category {
    match part {
        TimePart::Month => Category::Text(ts.format("%B").to_string()),
        TimePart::Day => Category::Text(ts.format("%A").to_string()),
        TimePart::Hour => Category::Int(i64::from(ts.hour())),
    }
}
