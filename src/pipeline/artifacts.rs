//! Persisted outputs: fitted preprocessor, transformed bundles, processed data

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::features::TARGET_COL;
use super::preprocess::FittedPreprocessor;

/// A transformed predictor matrix with its row-aligned target.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub x: DataFrame,
    pub y: Series,
}

impl Bundle {
    pub fn rows(&self) -> usize {
        self.x.height()
    }
}

/// Write the fitted preprocessor as pretty-printed JSON.
pub fn save_preprocessor(preprocessor: &FittedPreprocessor, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create preprocessor file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), preprocessor)
        .with_context(|| format!("Failed to serialize preprocessor to {}", path.display()))?;
    Ok(())
}

/// Read a preprocessor written by [`save_preprocessor`].
pub fn load_preprocessor(path: &Path) -> Result<FittedPreprocessor> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open preprocessor file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse preprocessor from {}", path.display()))
}

/// Write a bundle as Parquet: feature columns followed by `is_churned`.
pub fn write_bundle(bundle: &Bundle, path: &Path) -> Result<()> {
    let mut frame = bundle.x.clone();
    frame
        .with_column(bundle.y.clone().with_name(TARGET_COL.into()))
        .context("Target length does not match the feature matrix")?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create bundle file: {}", path.display()))?;
    ParquetWriter::new(file)
        .finish(&mut frame)
        .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
    Ok(())
}

/// Read a bundle written by [`write_bundle`].
pub fn read_bundle(path: &Path) -> Result<Bundle> {
    let frame = LazyFrame::scan_parquet(path, Default::default())
        .and_then(|lf| lf.collect())
        .with_context(|| format!("Failed to read bundle: {}", path.display()))?;

    let y = frame
        .column(TARGET_COL)
        .with_context(|| format!("Bundle {} has no '{}' column", path.display(), TARGET_COL))?
        .as_materialized_series()
        .clone();
    let x = frame.drop(TARGET_COL)?;

    Ok(Bundle { x, y })
}

/// Save a frame to CSV or Parquet based on the file extension.
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}
