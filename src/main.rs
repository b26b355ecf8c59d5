//! ivbin: Information Value binning CLI
//!
//! Finds monotonic, IV-maximizing breakpoints for the numeric features of a
//! dataset against a binary target, and reports the resulting bins.

mod cli;
mod pipeline;
mod report;
mod utils;

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use cli::{confirm_step, select_target, select_target_mapping, Cli};
use pipeline::{
    analyze_features, analyze_target_column, count_mapped_records, count_target_rows,
    get_column_names, load_dataset, TargetAnalysis, TargetMapping,
};
use report::{display_feature, display_summary, export_binning};
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let target = match &cli.target {
        Some(target) => target.clone(),
        None if cli.no_confirm => anyhow::bail!(
            "Target column is required when using --no-confirm. Use -t/--target to specify."
        ),
        None => {
            let columns = get_column_names(&cli.input)?;
            select_target(&columns)?
        }
    };

    let export_path = cli.export_path();

    print_banner(env!("CARGO_PKG_VERSION"));

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");

    let spinner = create_spinner("Reading dataset...");
    let df = load_dataset(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", df.height());
    println!("      Columns: {}", df.width());

    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    if !column_names.contains(&target) {
        anyhow::bail!(
            "Target column '{}' not found in dataset. Available columns: {:?}",
            target,
            column_names
        );
    }

    let mapping = resolve_mapping(&cli, &df, &target)?;

    // --min-cnt-pct is a share of the rows that reach binning
    let binned_rows = count_target_rows(&df, &target, mapping.as_ref())?;
    let options = cli.binning_options(binned_rows);
    println!();
    print_config(&cli.input, &target, export_path.as_deref(), &options);

    if !cli.no_confirm && !confirm_step("Proceed with binning?")? {
        println!("Cancelled by user.");
        return Ok(());
    }

    // Step 2: Bin features
    print_step_header(2, "Information Value Binning");

    let analysis = analyze_features(
        &df,
        &target,
        cli.feature_selection(),
        &options,
        mapping.as_ref(),
    )?;

    if analysis.features.is_empty() {
        print_warning("No features could be binned");
    } else {
        print_count("feature(s) binned", analysis.features.len());
        print_success("Binning complete");
    }

    if !cli.summary_only {
        for feature in &analysis.features {
            display_feature(feature);
        }
    }
    display_summary(&analysis);

    // Step 3: Export
    if let Some(path) = export_path {
        print_step_header(3, "Export Results");

        let spinner = create_spinner("Writing JSON...");
        export_binning(
            &analysis,
            &path,
            &cli.input.display().to_string(),
            &target,
            &options,
        )?;
        finish_with_success(&spinner, &format!("Saved to {}", path.display()));
    }

    print_completion();

    Ok(())
}

/// Install the tracing subscriber; RUST_LOG takes precedence over -v/-q
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve how the target column maps onto 0/1
fn resolve_mapping(
    cli: &Cli,
    df: &polars::prelude::DataFrame,
    target: &str,
) -> Result<Option<TargetMapping>> {
    if let Some(mapping) = cli.target_mapping() {
        let (events, non_events, ignored) = count_mapped_records(df, target, &mapping)?;
        print_info(&format!(
            "Target mapping: '{}' -> 1 ({} rows), '{}' -> 0 ({} rows), {} ignored",
            mapping.event_value, events, mapping.non_event_value, non_events, ignored
        ));
        return Ok(Some(mapping));
    }

    match analyze_target_column(df, target)? {
        TargetAnalysis::AlreadyBinary => Ok(None),
        TargetAnalysis::NeedsMapping { unique_values } => {
            if cli.no_confirm {
                anyhow::bail!(
                    "Target column '{}' is not binary (found {} distinct values). Use --event-value and --non-event-value.",
                    target,
                    unique_values.len()
                );
            }
            print_warning(&format!(
                "Target column '{}' is not binary; choose the event and non-event values",
                target
            ));
            let mapping = select_target_mapping(&unique_values)?;
            let (events, non_events, ignored) = count_mapped_records(df, target, &mapping)?;
            print_info(&format!(
                "{} events, {} non-events, {} rows ignored",
                events, non_events, ignored
            ));
            Ok(Some(mapping))
        }
    }
}
