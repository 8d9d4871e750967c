//! Region, month and day-of-week selectors
//!
//! Selectors arrive as normalized strings (lowercase, words joined by `_`).
//! Month and day selectors accept either a numeric code or a full name; the
//! numeric form is tried first, then a case-insensitive name lookup.

use std::fmt;
use std::str::FromStr;

use chrono::{Month, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Selector value meaning "do not filter"
pub const NO_FILTER: &str = "n";

/// Region selector synonym for [`NO_FILTER`]
pub const ALL_REGIONS: &str = "all";

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Errors raised while resolving a selector string
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Unknown region '{0}', expected chicago (c), new_york_city (ny), washington (w) or n")]
    UnknownRegion(String),

    #[error("Invalid month selector '{0}', expected 1-12, a month name or n")]
    InvalidMonthSelector(String),

    #[error("Invalid day selector '{0}', expected 0-6 (0 = monday), a weekday name or n")]
    InvalidDaySelector(String),
}

/// A source partition of trip records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Chicago,
    NewYorkCity,
    Washington,
}

impl Region {
    /// Every region, in union order
    pub const ALL: [Region; 3] = [Region::Chicago, Region::NewYorkCity, Region::Washington];

    /// Short aliases accepted in place of the full key
    const ALIASES: [(&'static str, Region); 3] = [
        ("c", Region::Chicago),
        ("ny", Region::NewYorkCity),
        ("w", Region::Washington),
    ];

    /// Full region key, also the partition's file stem
    pub fn key(&self) -> &'static str {
        match self {
            Region::Chicago => "chicago",
            Region::NewYorkCity => "new_york_city",
            Region::Washington => "washington",
        }
    }

    /// Whether partitions of this region carry `gender` and `birth_year`
    pub fn has_demographics(&self) -> bool {
        !matches!(self, Region::Washington)
    }
}

impl FromStr for Region {
    type Err = SelectorError;

    /// Full key first, then the alias table
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.key() == s)
            .or_else(|| {
                Region::ALIASES
                    .into_iter()
                    .find(|(alias, _)| *alias == s)
                    .map(|(_, region)| region)
            })
            .ok_or_else(|| SelectorError::UnknownRegion(s.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which partitions a session reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionSelection {
    /// Every region, unioned on their shared columns
    All,
    /// A single region
    One(Region),
}

impl RegionSelection {
    /// Parse a region selector; `n` and `all` select every region
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        match selector {
            NO_FILTER | ALL_REGIONS => Ok(RegionSelection::All),
            other => other.parse().map(RegionSelection::One),
        }
    }

    /// Regions to load, in union order
    pub fn regions(&self) -> Vec<Region> {
        match self {
            RegionSelection::All => Region::ALL.to_vec(),
            RegionSelection::One(region) => vec![*region],
        }
    }

    /// Whether the loaded table can carry `gender` and `age_group`
    pub fn has_demographics(&self) -> bool {
        match self {
            RegionSelection::All => false,
            RegionSelection::One(region) => region.has_demographics(),
        }
    }
}

/// Parse a month selector; `Ok(None)` means no month filter
pub fn parse_month(selector: &str) -> Result<Option<Month>, SelectorError> {
    if selector == NO_FILTER {
        return Ok(None);
    }

    let invalid = || SelectorError::InvalidMonthSelector(selector.to_string());

    match selector.parse::<i64>() {
        Ok(code) => u8::try_from(code)
            .ok()
            .and_then(|code| Month::try_from(code).ok())
            .map(Some)
            .ok_or_else(invalid),
        Err(_) => months()
            .find(|month| month.name().eq_ignore_ascii_case(selector))
            .map(Some)
            .ok_or_else(invalid),
    }
}

/// Parse a day-of-week selector (0 = Monday); `Ok(None)` means no day filter
pub fn parse_weekday(selector: &str) -> Result<Option<Weekday>, SelectorError> {
    if selector == NO_FILTER {
        return Ok(None);
    }

    let invalid = || SelectorError::InvalidDaySelector(selector.to_string());

    match selector.parse::<i64>() {
        Ok(code) => u8::try_from(code)
            .ok()
            .and_then(|code| Weekday::try_from(code).ok())
            .map(Some)
            .ok_or_else(invalid),
        Err(_) => WEEKDAY_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(selector))
            .and_then(|idx| Weekday::try_from(idx as u8).ok())
            .map(Some)
            .ok_or_else(invalid),
    }
}

/// Full English month name
pub fn month_name(month: Month) -> &'static str {
    month.name()
}

/// Full English weekday name
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_monday() as usize]
}

fn months() -> impl Iterator<Item = Month> {
    (1u8..=12).filter_map(|n| Month::try_from(n).ok())
}

/// Normalize raw user input into selector form
///
/// Lowercases and joins whitespace-separated words with `_`, so
/// `" New York  City "` becomes `new_york_city`.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}
