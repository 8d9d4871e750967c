//! Fixed trip-record column contract
//!
//! Every partition is read against this list. The all-region union keeps only
//! the columns shared by every partition, so a renamed or missing header in one
//! file silently removes that column from combined reports.

use crate::data::ColumnType;

pub const START_TIME: &str = "start_time";
pub const END_TIME: &str = "end_time";
pub const START_STATION: &str = "start_station";
pub const END_STATION: &str = "end_station";
pub const TRIP_DURATION: &str = "trip_duration";
pub const USER_TYPE: &str = "user_type";
pub const GENDER: &str = "gender";
pub const BIRTH_YEAR: &str = "birth_year";
/// `birth_year` after loading; values are unchanged
pub const AGE_GROUP: &str = "age_group";
/// The unnamed leading row-number column of the source files
pub const ROW_INDEX: &str = "row_index";

/// Storage type a source column is parsed into
pub fn column_type(name: &str) -> ColumnType {
    match name {
        START_TIME | END_TIME => ColumnType::Timestamp,
        TRIP_DURATION | BIRTH_YEAR | AGE_GROUP => ColumnType::Float,
        ROW_INDEX => ColumnType::Int,
        _ => ColumnType::String,
    }
}

/// Map a source header to its column name
///
/// Lowercases and joins words with `_`; an empty header is the row index.
pub fn column_name(header: &str) -> String {
    let name = header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    if name.is_empty() || name.starts_with("unnamed") {
        ROW_INDEX.to_string()
    } else {
        name
    }
}
