//! Compare command implementation.
//!
//! The compare command:
//! 1. Lists the old and new metrics documents
//! 2. Runs the batch on the worker pool
//! 3. Writes the JSON summary (optional)
//! 4. Prints the terminal summary

use super::models::CompareArgs;
use crate::batch::{collect_documents, run_batch_with, BatchSummary};
use crate::output::{render_terminal_summary, write_summary};
use anyhow::{Context, Result};
use colored::*;
use log::info;
use std::path::Path;

/// Execute the compare command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The batch summary; pair failures are reported in it, not as errors
///
/// # Errors
/// * Input directories cannot be listed
/// * Batch setup fails (empty input, output directory, worker pool)
/// * Summary cannot be written
pub fn execute_compare(args: CompareArgs) -> Result<BatchSummary> {
    info!(
        "Comparing metrics in {} against {}",
        args.old_dir.display(),
        args.new_dir.display()
    );

    let old = collect_documents(&args.old_dir).context("Failed to list old metrics documents")?;
    let new = collect_documents(&args.new_dir).context("Failed to list new metrics documents")?;

    info!("Saving minimal tests in {}", args.output_dir.display());

    let summary =
        run_batch_with(&old, &new, &args.batch_config()).context("Failed to start the batch")?;

    report_summary(&summary, args.summary_json.as_deref(), args.print_summary)?;

    Ok(summary)
}

/// Write and/or print a summary
///
/// **Internal** - shared by the compare and retry commands
pub(super) fn report_summary(
    summary: &BatchSummary,
    summary_json: Option<&Path>,
    print_summary: bool,
) -> Result<()> {
    if let Some(path) = summary_json {
        write_summary(summary, path).context("Failed to write summary JSON")?;
        println!(
            "📊 Summary written to {}",
            path.display().to_string().cyan()
        );
    }

    if print_summary {
        println!("{}", render_terminal_summary(summary));
    }

    Ok(())
}
