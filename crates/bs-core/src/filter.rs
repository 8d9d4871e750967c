//! Month and day-of-week row filtering
//!
//! Both predicates look at `start_time` only. Each is optional, and since
//! both are plain row predicates they commute.

use chrono::{Datelike, Month, NaiveDateTime, Weekday};
use tracing::debug;

use crate::Result;
use crate::data::{DataFrame, Filter};
use crate::schema::START_TIME;
use crate::selector::{self, month_name, weekday_name};

/// Parsed month and day predicates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripFilter {
    pub month: Option<Month>,
    pub day: Option<Weekday>,
}

impl TripFilter {
    /// A filter that keeps every row
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse month and day selector strings
    pub fn parse(month_selector: &str, day_selector: &str) -> Result<Self> {
        Ok(Self {
            month: selector::parse_month(month_selector)?,
            day: selector::parse_weekday(day_selector)?,
        })
    }

    /// Whether no predicate is active
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }

    /// Whether a timestamp passes every active predicate
    pub fn matches(&self, ts: NaiveDateTime) -> bool {
        self.month.is_none_or(|month| ts.month() == month.number_from_month())
            && self.day.is_none_or(|day| ts.weekday() == day)
    }

    /// Keep the rows whose `start_time` passes the filter
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        if self.is_empty() {
            return Ok(df.clone());
        }

        let filter = Filter::new(df).by_timestamp(START_TIME, |ts| self.matches(ts))?;
        debug!(
            month = self.month.map(month_name),
            day = self.day.map(weekday_name),
            kept = filter.kept(),
            of = df.nrows(),
            "filtered trips"
        );

        Ok(filter.execute()?)
    }
}

/// Filter a table by month and day selector strings
pub fn apply(df: &DataFrame, month_selector: &str, day_selector: &str) -> Result<DataFrame> {
    TripFilter::parse(month_selector, day_selector)?.apply(df)
}
