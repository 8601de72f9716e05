//! Interactive prompts using dialoguer

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::Confirm;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm replacing artifacts from a previous run
pub fn confirm_overwrite(existing: &[PathBuf]) -> Result<bool> {
    let message = format!(
        "{} artifact(s) from a previous run will be overwritten. Continue?",
        existing.len()
    );
    confirm_step(&message)
}
