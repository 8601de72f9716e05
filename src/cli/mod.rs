//! CLI module - argument parsing, commands and interactive prompts

mod args;
pub mod prepare;
pub mod profile;
mod prompts;

pub use args::*;
pub use prepare::run_prepare;
pub use profile::run_profile;
pub use prompts::*;

use crate::config::ProjectPaths;
use crate::utils::print_kv;

/// Print the resolved project layout
pub fn run_paths(paths: &ProjectPaths) {
    print_kv("Project root", paths.root.display());
    print_kv("Raw data", paths.raw.display());
    print_kv("Processed data", paths.processed.display());
    print_kv("Vectorized data", paths.vectorized.display());
    print_kv("Raw dataset", paths.raw_dataset().display());
}
