//! Plain-text trip report

use std::fmt;

use bs_core::TripFilter;
use bs_core::schema::{
    AGE_GROUP, END_STATION, END_TIME, GENDER, START_STATION, START_TIME, TRIP_DURATION, USER_TYPE,
};

use crate::record::{
    CategoricalStats, ColumnStats, NumericStats, StatisticsRecord, TimePart, TimestampStats,
};

/// Section order of a report
pub const REPORT_ORDER: [&str; 8] = [
    START_STATION,
    END_STATION,
    TRIP_DURATION,
    AGE_GROUP,
    GENDER,
    USER_TYPE,
    START_TIME,
    END_TIME,
];

/// A statistics record ready for printing
///
/// Breakdowns that a filter pinned to one value (the month under a month
/// filter, the weekday under a day filter) are not printed, and neither are
/// `gender` and `age_group` for sessions that include washington.
#[derive(Debug, Clone)]
pub struct Report {
    pub record: StatisticsRecord,
    pub filter: TripFilter,
    pub demographics: bool,
}

impl Report {
    /// Create a report for a record computed under `filter`
    pub fn new(record: StatisticsRecord, filter: TripFilter, demographics: bool) -> Self {
        Self {
            record,
            filter,
            demographics,
        }
    }

    /// Report sections in print order, as `(column, stats)`
    pub fn sections(&self) -> impl Iterator<Item = (&'static str, &ColumnStats)> {
        REPORT_ORDER
            .into_iter()
            .filter(|&column| self.demographics || !matches!(column, GENDER | AGE_GROUP))
            .filter_map(|column| self.record.get(column).map(|stats| (column, stats)))
    }

    fn shows(&self, part: TimePart) -> bool {
        match part {
            TimePart::Month => self.filter.month.is_none(),
            TimePart::Day => self.filter.day.is_none(),
            TimePart::Hour => true,
        }
    }
}

fn label(column: &str) -> String {
    column.replace('_', " ")
}

fn write_categorical(
    f: &mut fmt::Formatter<'_>,
    column: &str,
    stats: &CategoricalStats,
) -> fmt::Result {
    let label = label(column);
    writeln!(f, "There were {} {}s.", stats.value_count, label)?;
    writeln!(
        f,
        "The most popular {} was '{}' with a frequency of {}",
        label, stats.most_popular, stats.freq_most_popular
    )?;
    writeln!(
        f,
        "The least popular {} was '{}' with a frequency of {}",
        label, stats.least_popular, stats.freq_least_popular
    )
}

fn write_numeric(f: &mut fmt::Formatter<'_>, column: &str, stats: &NumericStats) -> fmt::Result {
    writeln!(
        f,
        "The maximum {} was {}, the average was {}, and the minimum was {}",
        label(column),
        stats.max,
        stats.mean,
        stats.min
    )
}

impl Report {
    fn write_timestamp(
        &self,
        f: &mut fmt::Formatter<'_>,
        column: &str,
        stats: &TimestampStats,
    ) -> fmt::Result {
        // "start_time" -> "start", giving "starting" and "started"
        let verb = column.split('_').next().unwrap_or(column);

        for (part, part_stats) in stats.parts.iter().filter(|(part, _)| self.shows(**part)) {
            writeln!(
                f,
                "The most popular {verb}ing {part} was '{}'. {} trips {verb}ed at that time",
                part_stats.most_popular, part_stats.freq_most_popular
            )?;
            writeln!(
                f,
                "The least popular {verb}ing {part} was '{}'. {} trips {verb}ed at that time",
                part_stats.least_popular, part_stats.freq_least_popular
            )?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (column, stats) in self.sections() {
            match stats {
                ColumnStats::Categorical(stats) => write_categorical(f, column, stats)?,
                ColumnStats::Numeric(stats) => write_numeric(f, column, stats)?,
                ColumnStats::Timestamp(stats) => {
                    self.write_timestamp(f, column, stats)?;
                    continue;
                }
            }
            writeln!(f)?;
        }

        for omitted in &self.record.omitted {
            writeln!(f, "No {} data matched the selected filters.", label(&omitted.column))?;
        }

        Ok(())
    }
}
