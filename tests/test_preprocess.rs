//! Tests for the column-wise preprocessor

use churnprep::pipeline::{
    build_preprocessor, engineer_features, load_preprocessor, make_x_y, save_preprocessor,
    stratified_split, ColumnGroups, PrepError, Preprocessor, PreprocessorConfig, RemainderPolicy,
    SplitOptions, UnknownCategoryPolicy, BINARY_FEATURES, CATEGORICAL_FEATURES, NUMERIC_FEATURES,
};
use polars::prelude::*;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn predictors(rows: usize, seed: u64) -> DataFrame {
    let engineered = engineer_features(&create_churn_dataframe(rows, seed)).unwrap();
    make_x_y(&engineered).unwrap().0
}

#[test]
fn test_default_plan_groups() {
    let plan = build_preprocessor();
    let config = plan.config();

    assert_eq!(config.groups.numeric, NUMERIC_FEATURES.to_vec());
    assert_eq!(config.groups.categorical, CATEGORICAL_FEATURES.to_vec());
    assert_eq!(config.groups.binary, BINARY_FEATURES.to_vec());
    assert_eq!(config.unknown_categories, UnknownCategoryPolicy::Ignore);
    assert_eq!(config.remainder, RemainderPolicy::Drop);
}

#[test]
fn test_transform_does_not_change_fitted_state() {
    let engineered = engineer_features(&create_churn_dataframe(200, 11)).unwrap();
    let (x, y) = make_x_y(&engineered).unwrap();
    let split = stratified_split(&x, &y, &SplitOptions::default()).unwrap();

    let fitted = build_preprocessor().fit(&split.x_train).unwrap();
    let snapshot = fitted.clone();

    fitted.transform(&split.x_test).unwrap();
    fitted.transform(&split.x_train).unwrap();

    assert_eq!(fitted, snapshot);
    assert_eq!(fitted.n_rows_fitted(), split.x_train.height());
}

#[test]
fn test_fit_on_train_ignores_test_statistics() {
    let engineered = engineer_features(&create_churn_dataframe(200, 11)).unwrap();
    let (x, y) = make_x_y(&engineered).unwrap();
    let split = stratified_split(&x, &y, &SplitOptions::default()).unwrap();

    let from_train = build_preprocessor().fit(&split.x_train).unwrap();
    let from_all = build_preprocessor().fit(&x).unwrap();

    let train_ages = f64_values(&split.x_train, "age");
    let n = train_ages.len() as f64;
    let expected_mean = train_ages.iter().flatten().sum::<f64>() / n;

    let age = from_train.scalers().iter().find(|s| s.column == "age").unwrap();
    assert!((age.mean - expected_mean).abs() < 1e-9);
    assert_ne!(from_train.scalers(), from_all.scalers());
}

#[test]
fn test_standardized_training_columns_are_centered() {
    let x = predictors(120, 3);
    let fitted = build_preprocessor().fit(&x).unwrap();
    let out = fitted.transform(&x).unwrap();

    for column in NUMERIC_FEATURES {
        let values: Vec<f64> = f64_values(&out, &format!("num__{}", column))
            .into_iter()
            .flatten()
            .collect();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        assert!(mean.abs() < 1e-9, "{} mean {}", column, mean);
        assert!((var - 1.0).abs() < 1e-9, "{} variance {}", column, var);
    }
}

#[test]
fn test_output_width_matches_feature_names() {
    let x = predictors(80, 9);
    let fitted = build_preprocessor().fit(&x).unwrap();
    let out = fitted.transform(&x).unwrap();

    let names = fitted.feature_names_out();
    let columns: Vec<String> = out.get_column_names().iter().map(|s| s.to_string()).collect();

    assert_eq!(columns, names);
    assert_eq!(out.width(), fitted.n_features_out());
    assert_eq!(out.height(), x.height());
    assert!(names.contains(&"num__ads_per_song".to_string()));
    assert!(names.contains(&"bin__offline_listening".to_string()));
    assert!(names.iter().any(|n| n.starts_with("cat__subscription_type_")));
    assert!(fitted.dropped_columns().is_empty());
}

#[test]
fn test_one_hot_rows_sum_to_one_for_known_categories() {
    let x = predictors(60, 4);
    let fitted = build_preprocessor().fit(&x).unwrap();
    let out = fitted.transform(&x).unwrap();

    let gender_cols: Vec<String> = fitted
        .feature_names_out()
        .into_iter()
        .filter(|n| n.starts_with("cat__gender_"))
        .collect();

    for row in 0..out.height() {
        let total: f64 = gender_cols
            .iter()
            .map(|c| f64_values(&out, c)[row].unwrap())
            .sum();
        assert_eq!(total, 1.0, "row {} should have exactly one gender", row);
    }
}

#[test]
fn test_unseen_category_encodes_to_zeros() {
    let x = predictors(60, 4);
    let fitted = build_preprocessor().fit(&x).unwrap();

    let mut unseen = x.head(Some(5));
    unseen
        .with_column(Column::new("country".into(), vec!["BR"; 5]))
        .unwrap();
    let out = fitted.transform(&unseen).unwrap();

    let country_cols: Vec<String> = fitted
        .feature_names_out()
        .into_iter()
        .filter(|n| n.starts_with("cat__country_"))
        .collect();
    assert!(!country_cols.is_empty());
    for column in &country_cols {
        assert_eq!(f64_values(&out, column), vec![Some(0.0); 5], "{}", column);
    }
}

#[test]
fn test_unseen_category_rejected_with_error_policy() {
    let x = predictors(60, 4);
    let plan = Preprocessor::new(PreprocessorConfig {
        unknown_categories: UnknownCategoryPolicy::Error,
        ..build_preprocessor().config().clone()
    });
    let fitted = plan.fit(&x).unwrap();

    let mut unseen = x.head(Some(2));
    unseen
        .with_column(Column::new("device_type".into(), ["Tablet", "Mobile"]))
        .unwrap();

    let err = fitted.transform(&unseen).unwrap_err();
    assert!(
        matches!(err, PrepError::UnknownCategory { ref column, ref value }
            if column == "device_type" && value == "Tablet")
    );
}

#[test]
fn test_remainder_columns_dropped_and_recorded() {
    let mut x = predictors(20, 2);
    x.with_column(Column::new("signup_channel".into(), vec!["web"; 20]))
        .unwrap();

    let fitted = build_preprocessor().fit(&x).unwrap();
    let out = fitted.transform(&x).unwrap();

    assert_eq!(fitted.dropped_columns(), ["signup_channel".to_string()]);
    assert_missing_columns(&out, &["signup_channel"]);
}

#[test]
fn test_remainder_rejected_with_reject_policy() {
    let mut x = predictors(20, 2);
    x.with_column(Column::new("signup_channel".into(), vec!["web"; 20]))
        .unwrap();
    let plan = Preprocessor::new(PreprocessorConfig {
        remainder: RemainderPolicy::Reject,
        ..build_preprocessor().config().clone()
    });

    let err = plan.fit(&x).unwrap_err();
    assert!(matches!(err, PrepError::UncoveredColumns { ref columns } if columns == &["signup_channel"]));
}

#[test]
fn test_overlapping_groups_rejected() {
    let plan = Preprocessor::new(PreprocessorConfig {
        groups: ColumnGroups::new(&["age"], &["gender"], &["age"]),
        unknown_categories: UnknownCategoryPolicy::Ignore,
        remainder: RemainderPolicy::Drop,
    });

    let err = plan.fit(&predictors(20, 2)).unwrap_err();
    assert!(matches!(err, PrepError::OverlappingGroups { ref column, .. } if column == "age"));
}

#[test]
fn test_fit_requires_grouped_columns() {
    let x = predictors(20, 2).drop("skip_rate").unwrap();

    let err = build_preprocessor().fit(&x).unwrap_err();
    assert!(matches!(err, PrepError::MissingColumn { ref column, .. } if column == "skip_rate"));
}

#[test]
fn test_fit_rejects_empty_frame() {
    let x = predictors(20, 2).head(Some(0));

    let err = build_preprocessor().fit(&x).unwrap_err();
    assert!(matches!(err, PrepError::EmptyFrame));
}

#[test]
fn test_preprocessor_persists_as_json() {
    let x = predictors(40, 6);
    let fitted = build_preprocessor().fit(&x).unwrap();

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preprocessor.json");
    save_preprocessor(&fitted, &path).unwrap();
    let restored = load_preprocessor(&path).unwrap();

    assert_eq!(restored, fitted);
    let before = fitted.transform(&x).unwrap();
    let after = restored.transform(&x).unwrap();
    assert!(before.equals_missing(&after));

    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"unknown_categories\": \"ignore\""));
}

#[test]
fn test_reloaded_preprocessor_is_bit_identical_across_seeds() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preprocessor.json");

    for seed in 0..300 {
        let x = predictors(97, seed);
        let fitted = build_preprocessor().fit(&x).unwrap();

        save_preprocessor(&fitted, &path).unwrap();
        let restored = load_preprocessor(&path).unwrap();

        for (a, b) in fitted.scalers().iter().zip(restored.scalers()) {
            assert_eq!(a.mean.to_bits(), b.mean.to_bits(), "seed {} {} mean", seed, a.column);
            assert_eq!(a.scale.to_bits(), b.scale.to_bits(), "seed {} {} scale", seed, a.column);
        }
        assert_eq!(restored, fitted, "seed {}", seed);
    }
}
