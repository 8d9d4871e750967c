//! Tests for the statistics aggregator
//!
//! Covers the three summary strategies, the tie-break and single-value
//! policies, and per-column omission of empty columns.

use bs_core::data::{DataFrame, DataFrameBuilder, Series};
use bs_core::filter;
use bs_core::schema::*;
use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    aggregate::{aggregate, categorical, numeric_duration, timestamp},
    error::StatsError,
    record::{Category, ColumnStats, TimePart},
};

// ==================== Test Fixtures ====================

fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, month, day)
        .unwrap()
        .and_hms_opt(hour, 5, 0)
        .unwrap()
}

fn text(values: &[&str]) -> Vec<Category> {
    values.iter().map(|&v| Category::from(v)).collect()
}

/// Six Chicago-like trips across January and February 2017
fn chicago_trips() -> DataFrame {
    DataFrameBuilder::new()
        .with_column(ROW_INDEX, Series::int(vec![10, 11, 12, 13, 14, 15]))
        .unwrap()
        .with_column(
            START_TIME,
            Series::timestamp(vec![
                at(1, 2, 8),  // Monday
                at(1, 2, 17), // Monday
                at(1, 3, 8),  // Tuesday
                at(1, 9, 8),  // Monday
                at(2, 6, 17), // Monday
                at(2, 7, 9),  // Tuesday
            ]),
        )
        .unwrap()
        .with_column(
            END_TIME,
            Series::timestamp(vec![
                at(1, 2, 9),
                at(1, 2, 17),
                at(1, 3, 9),
                at(1, 9, 9),
                at(2, 6, 17),
                at(2, 7, 9),
            ]),
        )
        .unwrap()
        .with_column(
            TRIP_DURATION,
            Series::float(vec![300.0, 451.0, f64::NAN, 122.0, 1999.0, 60.0]),
        )
        .unwrap()
        .with_column(
            START_STATION,
            Series::strings(&[
                "Canal St", "Clark St", "Canal St", "Wells St", "Canal St", "Clark St",
            ]),
        )
        .unwrap()
        .with_column(
            USER_TYPE,
            Series::strings(&[
                "Subscriber",
                "Subscriber",
                "Customer",
                "Subscriber",
                "Customer",
                "Subscriber",
            ]),
        )
        .unwrap()
        .with_column(
            GENDER,
            Series::string(vec![
                Some("Male".to_string()),
                None,
                Some("Female".to_string()),
                Some("Male".to_string()),
                None,
                None,
            ]),
        )
        .unwrap()
        .with_column(
            AGE_GROUP,
            Series::float(vec![1989.0, 1989.0, f64::NAN, 1975.0, 2001.0, 1989.0]),
        )
        .unwrap()
        .build()
        .unwrap()
}

// ==================== Categorical ====================

#[test]
fn test_categorical_extremes() {
    let stats = categorical("station", text(&["b", "a", "b", "c", "b", "a"])).unwrap();

    assert_eq!(stats.most_popular, Category::from("b"));
    assert_eq!(stats.freq_most_popular, 3);
    assert_eq!(stats.least_popular, Category::from("c"));
    assert_eq!(stats.freq_least_popular, 1);
    assert_eq!(stats.value_count, 3);
}

#[test]
fn test_categorical_ties_break_on_key_order() {
    let stats = categorical("station", text(&["z", "y", "x", "y", "z", "w"])).unwrap();

    // y and z tie for most, w and x tie for least
    assert_eq!(stats.most_popular, Category::from("y"));
    assert_eq!(stats.least_popular, Category::from("w"));
}

#[test]
fn test_categorical_all_equal_counts_stay_distinct() {
    let stats = categorical("gender", text(&["Male", "Female"])).unwrap();

    assert_eq!(stats.most_popular, Category::from("Female"));
    assert_eq!(stats.least_popular, Category::from("Male"));
    assert_eq!(stats.freq_most_popular, stats.freq_least_popular);
}

#[test]
fn test_categorical_single_value() {
    let stats = categorical("user_type", text(&["Customer", "Customer"])).unwrap();

    assert_eq!(stats.most_popular, stats.least_popular);
    assert_eq!(stats.freq_most_popular, 2);
    assert_eq!(stats.freq_least_popular, 2);
    assert_eq!(stats.value_count, 1);
}

#[test]
fn test_categorical_empty() {
    let err = categorical("gender", Vec::<Category>::new()).unwrap_err();

    assert!(matches!(err, StatsError::EmptyColumn(column) if column == "gender"));
}

#[test]
fn test_categorical_invariants() {
    let inputs = [
        text(&["a"]),
        text(&["a", "b", "b", "c", "c", "c"]),
        text(&["q", "q", "r", "r", "s", "s", "t"]),
        (0..50).map(|i| Category::Int(i % 7)).collect(),
    ];

    for values in inputs {
        let distinct = values.iter().collect::<std::collections::HashSet<_>>().len();
        let stats = categorical("col", values).unwrap();

        assert!(stats.freq_most_popular >= stats.freq_least_popular);
        assert_eq!(stats.value_count, distinct);
        if distinct > 1 {
            assert_ne!(stats.most_popular, stats.least_popular);
        }
    }
}

// ==================== Numeric ====================

#[test]
fn test_numeric_duration_skips_missing() {
    let series = Series::float(vec![10.0, f64::NAN, 15.0, 20.0]);

    let stats = numeric_duration(TRIP_DURATION, &series).unwrap();

    assert_eq!(stats.max, 20);
    assert_eq!(stats.min, 10);
    assert_eq!(stats.mean, 15);
}

#[test]
fn test_numeric_mean_truncates() {
    // 2 + 3 + 3 = 8, mean 2.67
    let stats = numeric_duration(TRIP_DURATION, &Series::int(vec![2, 3, 3])).unwrap();
    assert_eq!(stats.mean, 2);

    let stats = numeric_duration(TRIP_DURATION, &Series::float(vec![-2.0, -3.0, -3.0])).unwrap();
    assert_eq!(stats.mean, -2);
}

#[test]
fn test_numeric_bounds() {
    let series = Series::float(vec![61.0, 7200.5, 450.0, 450.0, 3.0]);

    let stats = numeric_duration(TRIP_DURATION, &series).unwrap();

    assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    assert_eq!(stats.max, 7200);
}

#[test]
fn test_numeric_empty_and_wrong_type() {
    assert!(matches!(
        numeric_duration(TRIP_DURATION, &Series::float(vec![f64::NAN])),
        Err(StatsError::EmptyColumn(_))
    ));
    assert!(matches!(
        numeric_duration(TRIP_DURATION, &Series::strings(&["long"])),
        Err(StatsError::Data(_))
    ));
}

// ==================== Timestamp ====================

#[test]
fn test_timestamp_breakdowns() {
    let df = chicago_trips();

    let stats = timestamp(START_TIME, df.get_column(START_TIME).unwrap()).unwrap();

    let month = stats.get(TimePart::Month).unwrap();
    assert_eq!(month.most_popular, Category::from("January"));
    assert_eq!(month.freq_most_popular, 4);
    assert_eq!(month.least_popular, Category::from("February"));

    let day = stats.get(TimePart::Day).unwrap();
    assert_eq!(day.most_popular, Category::from("Monday"));
    assert_eq!(day.freq_most_popular, 4);
    assert_eq!(day.least_popular, Category::from("Tuesday"));

    let hour = stats.get(TimePart::Hour).unwrap();
    assert_eq!(hour.most_popular, Category::Int(8));
    assert_eq!(hour.freq_most_popular, 3);
    assert_eq!(hour.least_popular, Category::Int(9));
    assert_eq!(hour.value_count, 3);
}

#[test]
fn test_single_valued_breakdown_is_skipped() {
    let df = filter::apply(&chicago_trips(), "1", "n").unwrap();

    let stats = timestamp(START_TIME, df.get_column(START_TIME).unwrap()).unwrap();

    assert!(stats.get(TimePart::Month).is_none());
    assert!(stats.get(TimePart::Day).is_some());
    assert!(stats.get(TimePart::Hour).is_some());
}

#[test]
fn test_timestamp_skips_missing_values() {
    let series = Series::nullable_timestamp(vec![
        Some(at(1, 2, 8)),
        None,
        Some(at(2, 6, 8)),
        Some(at(2, 7, 17)),
    ]);

    let stats = timestamp(END_TIME, &series).unwrap();

    let month = stats.get(TimePart::Month).unwrap();
    assert_eq!(month.most_popular, Category::from("February"));
    assert_eq!(month.freq_most_popular, 2);
    assert_eq!(month.freq_least_popular, 1);

    let hour = stats.get(TimePart::Hour).unwrap();
    assert_eq!(hour.freq_most_popular + hour.freq_least_popular, 3);

    assert!(matches!(
        timestamp(END_TIME, &Series::nullable_timestamp(vec![None, None])),
        Err(StatsError::EmptyColumn(_))
    ));
}

#[test]
fn test_timestamp_keys_serialize_lowercase() {
    let df = chicago_trips();
    let stats = timestamp(END_TIME, df.get_column(END_TIME).unwrap()).unwrap();

    let json = serde_json::to_value(&stats).unwrap();

    assert_eq!(json["month"]["most_popular"], "January");
    assert_eq!(json["hour"]["most_popular"], 9);
}

// ==================== Whole table ====================

#[test]
fn test_aggregate_dispatches_by_kind() {
    let record = aggregate(&chicago_trips()).unwrap();

    assert_eq!(
        record.column_names(),
        vec![
            START_TIME,
            END_TIME,
            TRIP_DURATION,
            START_STATION,
            USER_TYPE,
            GENDER,
            AGE_GROUP
        ]
    );
    assert!(record.omitted.is_empty());

    assert!(matches!(record.get(START_TIME), Some(ColumnStats::Timestamp(_))));

    let duration = record.get(TRIP_DURATION).unwrap().as_numeric().unwrap();
    assert_eq!((duration.max, duration.mean, duration.min), (1999, 586, 60));

    let gender = record.get(GENDER).unwrap().as_categorical().unwrap();
    assert_eq!(gender.value_count, 2);
    assert_eq!(gender.most_popular, Category::from("Male"));

    let age = record.get(AGE_GROUP).unwrap().as_categorical().unwrap();
    assert_eq!(age.most_popular, Category::Int(1989));
    assert_eq!(age.freq_most_popular, 3);
    assert_eq!(age.least_popular, Category::Int(1975));
    assert_eq!(age.value_count, 3);
}

#[test]
fn test_aggregate_skips_row_index() {
    let record = aggregate(&chicago_trips()).unwrap();

    assert!(!record.contains(ROW_INDEX));
}

#[test]
fn test_empty_columns_are_omitted() {
    // Only the Tuesday in February survives; its gender is missing
    let df = filter::apply(&chicago_trips(), "2", "1").unwrap();
    assert_eq!(df.nrows(), 1);

    let record = aggregate(&df).unwrap();

    assert!(!record.contains(GENDER));
    assert_eq!(record.omitted.len(), 1);
    assert_eq!(record.omitted[0].column, GENDER);
    assert!(record.contains(USER_TYPE));

    let start = record.get(START_TIME).unwrap().as_timestamp().unwrap();
    assert!(start.is_empty());
}

#[test]
fn test_aggregate_empty_table() {
    let df = filter::apply(&chicago_trips(), "6", "n").unwrap();

    let record = aggregate(&df).unwrap();

    assert!(record.is_empty());
    let omitted: Vec<&str> = record.omitted.iter().map(|o| o.column.as_str()).collect();
    assert_eq!(
        omitted,
        vec![
            START_TIME,
            END_TIME,
            TRIP_DURATION,
            START_STATION,
            USER_TYPE,
            GENDER,
            AGE_GROUP
        ]
    );
}

#[test]
fn test_record_serializes_by_column() {
    let record = aggregate(&chicago_trips()).unwrap();

    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json[USER_TYPE]["most_popular"], "Subscriber");
    assert_eq!(json[USER_TYPE]["freq_most_popular"], 4);
    assert_eq!(json[TRIP_DURATION]["mean"], 586);
    assert_eq!(json[AGE_GROUP]["most_popular"], 1989);
    assert!(json[START_TIME]["day"].is_object());
    assert!(json.get("omitted").is_none());
}
