//! Error types for feature preparation.
//!
//! Schema problems (missing or wrongly typed columns) surface immediately as
//! one of these variants. Nothing in the pipeline attempts recovery.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while engineering, splitting, or preprocessing the dataset.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A column the operation depends on is absent from the frame.
    #[error("Column '{column}' not found. Available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// A column could not be cast to the type the operation requires.
    #[error("Column '{column}' cannot be cast to {target}: {source}")]
    Cast {
        column: String,
        target: &'static str,
        #[source]
        source: PolarsError,
    },

    /// The same column was assigned to more than one transformer group.
    #[error("Column '{column}' is assigned to both the {first} and {second} groups")]
    OverlappingGroups {
        column: String,
        first: &'static str,
        second: &'static str,
    },

    /// Predictor columns not covered by any group, under the reject policy.
    #[error("Columns not covered by any transformer group: {columns:?}")]
    UncoveredColumns { columns: Vec<String> },

    /// Fitting requires at least one row.
    #[error("Cannot fit preprocessor on an empty frame")]
    EmptyFrame,

    /// A numeric column contained only nulls at fit time.
    #[error("Numeric column '{column}' has no observed values to fit on")]
    NoObservedValues { column: String },

    /// A category not seen at fit time, under the error policy.
    #[error("Column '{column}' contains category '{value}' that was not seen during fit")]
    UnknownCategory { column: String, value: String },

    /// Test fraction outside (0, 1).
    #[error("Test size must be strictly between 0 and 1, got {0}")]
    InvalidTestSize(f64),

    /// A target class with fewer than two members cannot be stratified.
    #[error("Target class {class} has {count} row(s); stratification needs at least 2 per class")]
    ClassTooSmall { class: i64, count: usize },

    /// The target column contains nulls.
    #[error("Target column contains {0} null value(s)")]
    NullTarget(usize),

    /// Predictors and target disagree on row count.
    #[error("Predictor frame has {x_rows} rows but target has {y_rows}")]
    LengthMismatch { x_rows: usize, y_rows: usize },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type PrepResult<T> = std::result::Result<T, PrepError>;
