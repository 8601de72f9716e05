//! The `profile` command: churn distribution and per-group churn rates

use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::{
    churn_overview, churn_rate_by, engineer_features, load_dataset_with_progress,
    numeric_means_by_churn, GroupChurnRate, BINARY_FEATURES, CATEGORICAL_FEATURES, NUMERIC_FEATURES,
};
use crate::report::display_profile;
use crate::utils::{format_pct, print_banner, print_kv};

/// Load `input`, derive the ratio features and print the churn profile.
pub fn run_profile(input: &Path, infer_schema_length: usize) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));

    let (raw, _, _, _) = load_dataset_with_progress(input, infer_schema_length)?;
    let df = engineer_features(&raw)
        .with_context(|| format!("Failed to engineer features from {}", input.display()))?;

    let overview = churn_overview(&df)?;
    print_kv("Users", overview.users);
    print_kv("Churn rate", format_pct(overview.churn_rate));

    let group_rates = CATEGORICAL_FEATURES
        .iter()
        .chain(BINARY_FEATURES.iter())
        .map(|column| -> Result<(String, Vec<GroupChurnRate>)> {
            Ok((column.to_string(), churn_rate_by(&df, column)?))
        })
        .collect::<Result<Vec<_>>>()?;

    let means = numeric_means_by_churn(&df, &NUMERIC_FEATURES)?;

    display_profile(&overview, &group_rates, &means);
    Ok(())
}
