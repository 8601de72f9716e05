//! Pipeline module - feature engineering, splitting and preprocessing

pub mod artifacts;
pub mod columns;
pub mod error;
pub mod features;
pub mod loader;
pub mod preprocess;
pub mod profile;
pub mod split;

pub use artifacts::*;
pub use error::*;
pub use features::*;
pub use loader::*;
pub use preprocess::*;
pub use profile::*;
pub use split::*;

use polars::prelude::DataFrame;

/// Everything produced by one preparation run.
#[derive(Debug, Clone)]
pub struct PreparedData {
    /// Raw data plus the coerced and derived columns.
    pub engineered: DataFrame,
    pub preprocessor: FittedPreprocessor,
    pub train: Bundle,
    pub test: Bundle,
}

/// Engineer features, split stratified by churn, fit the preprocessing plan
/// on the training rows only, and transform both partitions with it.
pub fn prepare_dataset(raw: &DataFrame, split: &SplitOptions) -> PrepResult<PreparedData> {
    let engineered = engineer_features(raw)?;
    let (x, y) = make_x_y(&engineered)?;

    let parts = stratified_split(&x, &y, split)?;

    let preprocessor = build_preprocessor().fit(&parts.x_train)?;
    let x_train = preprocessor.transform(&parts.x_train)?;
    let x_test = preprocessor.transform(&parts.x_test)?;

    Ok(PreparedData {
        engineered,
        preprocessor,
        train: Bundle {
            x: x_train,
            y: parts.y_train,
        },
        test: Bundle {
            x: x_test,
            y: parts.y_test,
        },
    })
}
