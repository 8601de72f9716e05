//! churnprep: Churn Feature Preparation CLI
//!
//! Engineers ratio features, performs a stratified split and writes a fitted
//! preprocessor plus transformed train/test bundles.

use anyhow::Result;
use clap::Parser;

use churnprep::cli::{run_paths, run_prepare, run_profile, Cli, Commands};
use churnprep::config::ProjectPaths;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = ProjectPaths::discover(&cli.root)?;

    match &cli.command {
        Commands::Prepare(args) => {
            run_prepare(&paths, &args.resolve(&paths))?;
        }
        Commands::Profile {
            input,
            infer_schema_length,
        } => {
            let input = input.clone().unwrap_or_else(|| paths.raw_dataset());
            run_profile(&input, *infer_schema_length)?;
        }
        Commands::Paths => run_paths(&paths),
    }

    Ok(())
}
