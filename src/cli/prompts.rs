//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Confirm, Select};

use crate::pipeline::TargetMapping;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to pick the target column
pub fn select_target(columns: &[String]) -> Result<String> {
    if columns.is_empty() {
        anyhow::bail!("Dataset has no columns to choose a target from");
    }
    let idx = Select::new()
        .with_prompt("Select the binary target column")
        .items(columns)
        .default(0)
        .interact()?;
    Ok(columns[idx].clone())
}

/// Prompt user for the event and non-event values of a non-binary target
pub fn select_target_mapping(unique_values: &[String]) -> Result<TargetMapping> {
    if unique_values.len() < 2 {
        anyhow::bail!(
            "Target needs at least two distinct values to map, found {}",
            unique_values.len()
        );
    }

    let event_idx = Select::new()
        .with_prompt("Which value is the EVENT (maps to 1)?")
        .items(unique_values)
        .default(0)
        .interact()?;

    let remaining: Vec<&String> = unique_values
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != event_idx)
        .map(|(_, v)| v)
        .collect();

    let non_event_idx = Select::new()
        .with_prompt("Which value is the NON-EVENT (maps to 0)?")
        .items(&remaining)
        .default(0)
        .interact()?;

    Ok(TargetMapping::new(
        unique_values[event_idx].clone(),
        remaining[non_event_idx].clone(),
    ))
}
