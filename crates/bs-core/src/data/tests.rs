//! Tests for data module

use super::*;

use chrono::{NaiveDate, NaiveDateTime};

fn ts(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, 3, day)
        .unwrap()
        .and_hms_opt(hour, 15, 0)
        .unwrap()
}

fn trips() -> DataFrame {
    DataFrameBuilder::new()
        .with_column("start_time", Series::timestamp(vec![ts(1, 8), ts(2, 9), ts(3, 18)]))
        .unwrap()
        .with_column("trip_duration", Series::float(vec![300.0, f64::NAN, 900.0]))
        .unwrap()
        .with_column(
            "gender",
            Series::string(vec![Some("Male".to_string()), None, Some("Female".to_string())]),
        )
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn test_series_creation() {
    let int_series = Series::int(vec![1, 2, 3]);
    assert_eq!(int_series.len(), 3);
    assert_eq!(int_series.dtype(), "int64");

    let float_series = Series::float(vec![1.0, 2.0]);
    assert_eq!(float_series.dtype(), "float64");

    let string_series = Series::strings(&["a", "b"]);
    assert_eq!(string_series.len(), 2);
    assert_eq!(string_series.column_type(), ColumnType::String);

    let ts_series = Series::timestamp(vec![ts(1, 0)]);
    assert_eq!(ts_series.dtype(), "datetime");
}

#[test]
fn test_missing_values() {
    let df = trips();

    let duration = df.get_column("trip_duration").unwrap();
    assert_eq!(duration.len(), 3);
    assert_eq!(duration.count(), 2);
    assert_eq!(duration.get(1), None);
    assert_eq!(duration.get(2), Some(SeriesValue::Float(900.0)));

    let gender = df.get_column("gender").unwrap();
    assert_eq!(gender.count(), 2);
    assert_eq!(gender.get(1), None);
    assert_eq!(gender.get(7), None);
}

#[test]
fn test_dataframe_creation() {
    let df = DataFrame::from_columns(vec![
        ("x", Series::float(vec![1.0, 2.0, 3.0])),
        ("y", Series::int(vec![4, 5, 6])),
    ])
    .unwrap();

    assert_eq!(df.shape(), (3, 2));
    assert_eq!(df.column_names(), vec!["x", "y"]);
}

#[test]
fn test_builder_rejects_ragged_columns() {
    let result = DataFrameBuilder::new()
        .with_column("x", Series::int(vec![1, 2, 3]))
        .unwrap()
        .with_column("y", Series::int(vec![1, 2]));

    assert!(matches!(result, Err(DataError::DimensionMismatch { .. })));

    let result = DataFrameBuilder::new()
        .with_column("x", Series::int(vec![1]))
        .unwrap()
        .with_column("x", Series::int(vec![2]));

    assert!(matches!(result, Err(DataError::DuplicateColumn(name)) if name == "x"));
}

#[test]
fn test_dataframe_select() {
    let df = trips();

    let selected = df.select(["gender", "start_time"]).unwrap();
    assert_eq!(selected.shape(), (3, 2));
    assert_eq!(selected.column_names(), vec!["gender", "start_time"]);

    assert!(matches!(
        df.select(["birth_year"]),
        Err(DataError::ColumnNotFound(_))
    ));
}

#[test]
fn test_dataframe_filter() {
    let df = DataFrame::from_columns(vec![
        ("x", Series::float(vec![1.0, 2.0, 3.0, 4.0, 5.0])),
        ("y", Series::int(vec![1, 2, 3, 4, 5])),
    ])
    .unwrap();

    let mask = vec![true, false, true, false, true];
    let filtered = df.filter(&mask).unwrap();

    assert_eq!(filtered.shape(), (3, 2));

    let x_col = filtered.get_column("x").unwrap();
    if let Series::Float(arr) = x_col {
        assert_eq!(arr.to_vec(), vec![1.0, 3.0, 5.0]);
    } else {
        panic!("Expected Float series");
    }

    assert!(df.filter(&[true]).is_err());
}

#[test]
fn test_filter_op_by_timestamp() {
    let df = trips();

    let filter = Filter::new(&df)
        .by_timestamp("start_time", |t| t.format("%H").to_string() != "09")
        .unwrap();
    assert_eq!(filter.kept(), 2);
    assert_eq!(filter.execute().unwrap().nrows(), 2);

    assert!(matches!(
        Filter::new(&df).by_timestamp("gender", |_| true),
        Err(DataError::TypeMismatch { .. })
    ));
}

#[test]
fn test_filter_op_skips_missing_timestamps() {
    let df = DataFrame::from_columns(vec![(
        "start_time",
        Series::nullable_timestamp(vec![Some(ts(1, 8)), None, Some(ts(3, 8))]),
    )])
    .unwrap();

    let filter = Filter::new(&df).by_timestamp("start_time", |_| true).unwrap();

    assert_eq!(filter.kept(), 2);
    assert_eq!(df.column("start_time").unwrap().count(), 2);
}

#[test]
fn test_rename_keeps_position() {
    let df = trips().rename(&[("trip_duration", "duration")]).unwrap();

    assert_eq!(df.column_names(), vec!["start_time", "duration", "gender"]);

    assert!(matches!(
        trips().rename(&[("nope", "other")]),
        Err(DataError::ColumnNotFound(_))
    ));
    assert!(matches!(
        trips().rename(&[("gender", "start_time")]),
        Err(DataError::DuplicateColumn(_))
    ));
}

#[test]
fn test_concat_inner_keeps_shared_columns() {
    let a = DataFrame::from_columns(vec![
        ("id", Series::int(vec![1, 2])),
        ("gender", Series::strings(&["Male", "Female"])),
        ("duration", Series::int(vec![10, 20])),
    ])
    .unwrap();
    let b = DataFrame::from_columns(vec![
        ("duration", Series::float(vec![30.5])),
        ("id", Series::int(vec![3])),
    ])
    .unwrap();

    let unioned = DataFrame::concat_inner(&[a, b]).unwrap();

    assert_eq!(unioned.shape(), (3, 2));
    assert_eq!(unioned.column_names(), vec!["id", "duration"]);
    assert_eq!(
        unioned.get_column("duration").unwrap(),
        &Series::float(vec![10.0, 20.0, 30.5])
    );
    assert_eq!(
        unioned.get_column("id").unwrap(),
        &Series::int(vec![1, 2, 3])
    );
}

#[test]
fn test_concat_inner_type_conflict() {
    let a = DataFrame::from_columns(vec![("x", Series::int(vec![1]))]).unwrap();
    let b = DataFrame::from_columns(vec![("x", Series::strings(&["one"]))]).unwrap();

    assert!(matches!(
        DataFrame::concat_inner(&[a, b]),
        Err(DataError::TypeMismatch { column, .. }) if column == "x"
    ));
    assert!(matches!(
        DataFrame::concat_inner(&[]),
        Err(DataError::NothingToConcat)
    ));
}

#[test]
fn test_pages() {
    let ids: Vec<i64> = (0..12).collect();
    let df = DataFrame::from_columns(vec![("id", Series::int(ids))]).unwrap();

    let sizes: Vec<usize> = df.pages(5).map(|page| page.nrows()).collect();
    assert_eq!(sizes, vec![5, 5, 2]);

    let last = df.pages(5).last().unwrap();
    assert_eq!(last.get_column("id").unwrap(), &Series::int(vec![10, 11]));

    let pages: Vec<DataFrame> = df.pages(12).collect();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0], df);

    assert_eq!(DataFrame::new().pages(5).count(), 0);
}

#[test]
fn test_display_rows() {
    let df = trips().select(["start_time", "gender"]).unwrap();

    let text = df.display_rows().to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "start_time\tgender");
    assert_eq!(lines[1], "2017-03-01 08:15:00\tMale");
    assert_eq!(lines[2], "2017-03-02 09:15:00\t");
    assert_eq!(df.to_string(), "DataFrame(3 rows × 2 cols)");
}
