//! Run manifest export

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{PreparedData, SplitOptions};

/// Metadata about the preparation run
#[derive(Debug, Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub churnprep_version: String,
    pub input_file: String,
    pub test_size: f64,
    pub seed: u64,
}

/// Shape and class balance of one partition
#[derive(Debug, Serialize)]
pub struct PartitionStats {
    pub rows: usize,
    pub churn_rate: f64,
    pub file: String,
}

/// Complete manifest written next to the vectorized artifacts
#[derive(Debug, Serialize)]
pub struct PreparationManifest {
    pub metadata: RunMetadata,
    pub preprocessor_file: String,
    pub feature_names: Vec<String>,
    /// Predictor columns left out because no transformer group covers them
    pub dropped_columns: Vec<String>,
    pub train: PartitionStats,
    pub test: PartitionStats,
}

/// Output locations recorded in the manifest
pub struct ManifestPaths<'a> {
    pub input: &'a Path,
    pub preprocessor: &'a Path,
    pub train: &'a Path,
    pub test: &'a Path,
}

impl PreparationManifest {
    pub fn build(
        prepared: &PreparedData,
        split: &SplitOptions,
        paths: &ManifestPaths,
        train_churn_rate: f64,
        test_churn_rate: f64,
    ) -> Self {
        Self {
            metadata: RunMetadata {
                timestamp: Utc::now().to_rfc3339(),
                churnprep_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: paths.input.display().to_string(),
                test_size: split.test_size,
                seed: split.seed,
            },
            preprocessor_file: paths.preprocessor.display().to_string(),
            feature_names: prepared.preprocessor.feature_names_out(),
            dropped_columns: prepared.preprocessor.dropped_columns().to_vec(),
            train: PartitionStats {
                rows: prepared.train.rows(),
                churn_rate: train_churn_rate,
                file: paths.train.display().to_string(),
            },
            test: PartitionStats {
                rows: prepared.test.rows(),
                churn_rate: test_churn_rate,
                file: paths.test.display().to_string(),
            },
        }
    }

    /// Write the manifest as pretty-printed JSON
    pub fn write(&self, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize manifest")?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write manifest: {}", output_path.display()))?;
        Ok(())
    }
}
