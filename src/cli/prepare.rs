//! The `prepare` command: load, engineer, split, fit, transform, save

use std::time::Instant;

use anyhow::{Context, Result};

use super::args::PrepareOptions;
use super::prompts::confirm_overwrite;
use crate::config::{is_csv_file, ProjectPaths};
use crate::pipeline::{
    load_dataset_with_progress, positive_rate, prepare_dataset, save_dataset, save_preprocessor,
    write_bundle,
};
use crate::report::{ManifestPaths, PreparationManifest, PreparationSummary};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, format_pct, print_banner,
    print_completion, print_config, print_info, print_kv, print_step_header, print_step_time,
    print_success, print_warning,
};

/// Run the full preparation. Returns `None` when the user declines to
/// overwrite existing artifacts.
pub fn run_prepare(paths: &ProjectPaths, options: &PrepareOptions) -> Result<Option<PreparationSummary>> {
    let input = &options.input;
    if !is_csv_file(input) {
        anyhow::bail!("Input must be a CSV file: {}", input.display());
    }

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(input, &paths.vectorized, options.split.test_size, options.split.seed);

    let existing: Vec<_> = paths.output_files().into_iter().filter(|p| p.exists()).collect();
    if !existing.is_empty() && !options.no_confirm && !confirm_overwrite(&existing)? {
        println!("Cancelled by user.");
        return Ok(None);
    }

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let (raw, rows, cols, memory_mb) =
        load_dataset_with_progress(input, options.infer_schema_length)?;
    print_kv("Rows", rows);
    print_kv("Columns", cols);
    print_kv("Estimated memory", format!("{:.2} MB", memory_mb));

    let mut summary = PreparationSummary::new(rows, cols);
    let elapsed = step_start.elapsed();
    summary.record_step("load", elapsed);
    print_step_time(elapsed);

    // Step 2: Engineer, split, fit on train, transform both
    print_step_header(2, "Feature Preparation");
    let step_start = Instant::now();
    let spinner = create_spinner("Engineering features and fitting preprocessor...");
    let prepared = prepare_dataset(&raw, &options.split)
        .with_context(|| format!("Failed to prepare features from {}", input.display()))?;

    let dropped = prepared.preprocessor.dropped_columns();
    if dropped.is_empty() {
        finish_with_success(&spinner, "Preprocessor fitted on training partition");
    } else {
        finish_with_warning(&spinner, "Preprocessor fitted; some columns are not transformed");
        print_warning(&format!(
            "Dropping {} column(s) outside every transformer group: {}",
            dropped.len(),
            dropped.join(", ")
        ));
    }

    summary.engineered_columns = prepared.engineered.width();
    summary.train_rows = prepared.train.rows();
    summary.test_rows = prepared.test.rows();
    summary.train_churn_rate = positive_rate(&prepared.train.y)?;
    summary.test_churn_rate = positive_rate(&prepared.test.y)?;
    summary.features_out = prepared.preprocessor.n_features_out();
    summary.dropped_columns = dropped.to_vec();

    print_kv(
        "Train",
        format!("{} rows, churn {}", summary.train_rows, format_pct(summary.train_churn_rate)),
    );
    print_kv(
        "Test",
        format!("{} rows, churn {}", summary.test_rows, format_pct(summary.test_churn_rate)),
    );
    print_info(&format!(
        "{} predictor columns → {} output features",
        prepared.engineered.width().saturating_sub(2),
        summary.features_out
    ));
    let elapsed = step_start.elapsed();
    summary.record_step("prepare", elapsed);
    print_step_time(elapsed);

    // Step 3: Save artifacts
    print_step_header(3, "Save Artifacts");
    let step_start = Instant::now();
    paths.ensure_output_dirs()?;

    let spinner = create_spinner("Writing artifacts...");
    let mut engineered = prepared.engineered.clone();
    save_dataset(&mut engineered, &paths.engineered_dataset())?;
    save_preprocessor(&prepared.preprocessor, &paths.preprocessor_artifact())?;
    write_bundle(&prepared.train, &paths.train_bundle())?;
    write_bundle(&prepared.test, &paths.test_bundle())?;

    let manifest = PreparationManifest::build(
        &prepared,
        &options.split,
        &ManifestPaths {
            input,
            preprocessor: &paths.preprocessor_artifact(),
            train: &paths.train_bundle(),
            test: &paths.test_bundle(),
        },
        summary.train_churn_rate,
        summary.test_churn_rate,
    );
    manifest.write(&paths.manifest())?;
    finish_with_success(&spinner, &format!("Saved to {}", paths.vectorized.display()));

    for file in paths.output_files() {
        print_success(&file.display().to_string());
    }
    let elapsed = step_start.elapsed();
    summary.record_step("save", elapsed);
    print_step_time(elapsed);

    summary.display();
    print_completion();

    Ok(Some(summary))
}
