//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ProjectPaths;
use crate::pipeline::{SplitOptions, DEFAULT_SEED, DEFAULT_TEST_SIZE};

/// churnprep - Feature engineering and leak-free preprocessing for churn data
#[derive(Parser, Debug)]
#[command(name = "churnprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root containing the data/ directory
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Engineer features, split, fit the preprocessor and write artifacts
    Prepare(PrepareArgs),

    /// Print churn distribution and churn rate per group
    Profile {
        /// Input CSV (defaults to data/00_raw/spotify_churn_dataset.csv under the root)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of rows to use for schema inference.
        /// Use 0 for full table scan.
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },

    /// Show the resolved project directory layout
    Paths,
}

/// Flags of the `prepare` command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct PrepareArgs {
    /// Input CSV (defaults to data/00_raw/spotify_churn_dataset.csv under the root)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Fraction of rows held out for testing (0.0 to 1.0, exclusive)
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE, value_parser = validate_test_size)]
    pub test_size: f64,

    /// Seed for the stratified shuffle
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Overwrite existing artifacts without asking
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// Settings for one `prepare` run, resolved against the project layout
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareOptions {
    pub input: PathBuf,
    pub split: SplitOptions,
    pub no_confirm: bool,
    pub infer_schema_length: usize,
}

impl PrepareArgs {
    /// Resolve the flags, falling back to the raw dataset path.
    pub fn resolve(&self, paths: &ProjectPaths) -> PrepareOptions {
        PrepareOptions {
            input: self.input.clone().unwrap_or_else(|| paths.raw_dataset()),
            split: SplitOptions {
                test_size: self.test_size,
                seed: self.seed,
            },
            no_confirm: self.no_confirm,
            infer_schema_length: self.infer_schema_length,
        }
    }
}

/// Validator for the test_size parameter
fn validate_test_size(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "test_size must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    }
}
