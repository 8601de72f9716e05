//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

const GENDERS: [&str; 3] = ["Female", "Male", "Other"];
const COUNTRIES: [&str; 5] = ["CA", "DE", "IN", "UK", "US"];
const SUBSCRIPTIONS: [&str; 4] = ["Family", "Free", "Premium", "Student"];
const DEVICES: [&str; 3] = ["Desktop", "Mobile", "Web"];

/// Synthetic churn dataset with the raw schema.
///
/// Every fourth user churned (`user_id` 1, 5, 9, ...), so the churn rate is
/// exactly 25% whenever `rows` is a multiple of 4. Every fifth user plays
/// zero songs per day.
pub fn create_churn_dataframe(rows: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pick = |options: &[&str]| -> Vec<String> {
        (0..rows)
            .map(|_| options.choose(&mut rng).unwrap().to_string())
            .collect()
    };
    let gender = pick(&GENDERS[..]);
    let country = pick(&COUNTRIES[..]);
    let subscription = pick(&SUBSCRIPTIONS[..]);
    let device = pick(&DEVICES[..]);

    let user_id: Vec<i64> = (1..=rows as i64).collect();
    let age: Vec<i64> = (0..rows).map(|_| rng.gen_range(16..60)).collect();
    let listening_time: Vec<i64> = (0..rows).map(|_| rng.gen_range(10..300)).collect();
    let songs: Vec<i64> = (0..rows)
        .map(|i| if i % 5 == 0 { 0 } else { rng.gen_range(1..50) })
        .collect();
    let skip_rate: Vec<f64> = (0..rows)
        .map(|_| (rng.gen::<f64>() * 100.0).round() / 100.0)
        .collect();
    let ads: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..50)).collect();
    let offline: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    let churned: Vec<i64> = (0..rows).map(|i| i64::from(i % 4 == 0)).collect();

    df! {
        "user_id" => user_id,
        "gender" => gender,
        "age" => age,
        "country" => country,
        "subscription_type" => subscription,
        "listening_time" => listening_time,
        "songs_played_per_day" => songs,
        "skip_rate" => skip_rate,
        "device_type" => device,
        "ads_listened_per_week" => ads,
        "offline_listening" => offline,
        "is_churned" => churned,
    }
    .unwrap()
}

/// Single-row frame matching the worked example in the dataset notes.
pub fn create_example_row() -> DataFrame {
    df! {
        "user_id" => [123i64],
        "gender" => ["Female"],
        "age" => [54i64],
        "country" => ["US"],
        "subscription_type" => ["Free"],
        "listening_time" => [789i64],
        "songs_played_per_day" => [19i64],
        "skip_rate" => [0.04f64],
        "device_type" => ["Mobile"],
        "ads_listened_per_week" => [31i64],
        "offline_listening" => [0i64],
        "is_churned" => [1i64],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a project root whose raw data directory holds `df` under the
/// default raw dataset file name
pub fn create_temp_project(df: &mut DataFrame) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let raw_dir = temp_dir.path().join("data").join("00_raw");
    std::fs::create_dir_all(&raw_dir).unwrap();

    let mut file = std::fs::File::create(raw_dir.join("spotify_churn_dataset.csv")).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    temp_dir
}

/// Values of a column as `f64`
pub fn f64_values(df: &DataFrame, column: &str) -> Vec<Option<f64>> {
    df.column(column)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
