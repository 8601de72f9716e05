//! Project directory layout
//!
//! All paths are derived from a single project root chosen at start-up and
//! passed around as a [`ProjectPaths`] value.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File name of the raw dataset inside `data/00_raw`.
pub const RAW_DATASET_FILE: &str = "spotify_churn_dataset.csv";

/// File name of the engineered dataset inside `data/01_processed`.
pub const ENGINEERED_DATASET_FILE: &str = "spotify_churn_engineered.csv";

pub const PREPROCESSOR_FILE: &str = "preprocessor.json";
pub const TRAIN_BUNDLE_FILE: &str = "train.parquet";
pub const TEST_BUNDLE_FILE: &str = "test.parquet";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Resolved directory layout of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub data: PathBuf,
    pub raw: PathBuf,
    pub processed: PathBuf,
    pub vectorized: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data = root.join("data");
        Self {
            raw: data.join("00_raw"),
            processed: data.join("01_processed"),
            vectorized: data.join("02_vectorized"),
            data,
            root,
        }
    }

    /// Resolve `start` to an absolute root and derive the layout from it.
    pub fn discover(start: &Path) -> Result<Self> {
        Ok(Self::new(get_project_root(start)?))
    }

    pub fn raw_dataset(&self) -> PathBuf {
        self.raw.join(RAW_DATASET_FILE)
    }

    pub fn engineered_dataset(&self) -> PathBuf {
        self.processed.join(ENGINEERED_DATASET_FILE)
    }

    pub fn preprocessor_artifact(&self) -> PathBuf {
        self.vectorized.join(PREPROCESSOR_FILE)
    }

    pub fn train_bundle(&self) -> PathBuf {
        self.vectorized.join(TRAIN_BUNDLE_FILE)
    }

    pub fn test_bundle(&self) -> PathBuf {
        self.vectorized.join(TEST_BUNDLE_FILE)
    }

    pub fn manifest(&self) -> PathBuf {
        self.vectorized.join(MANIFEST_FILE)
    }

    /// Every file a `prepare` run writes.
    pub fn output_files(&self) -> Vec<PathBuf> {
        vec![
            self.engineered_dataset(),
            self.preprocessor_artifact(),
            self.train_bundle(),
            self.test_bundle(),
            self.manifest(),
        ]
    }

    /// Create the processed and vectorized directories.
    pub fn ensure_output_dirs(&self) -> Result<()> {
        for dir in [&self.processed, &self.vectorized] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }
}

/// Canonical absolute form of `start`.
pub fn get_project_root(start: &Path) -> Result<PathBuf> {
    start
        .canonicalize()
        .with_context(|| format!("Project root does not exist: {}", start.display()))
}

/// True when the path has a `.csv` extension (any case).
pub fn is_csv_file(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}
