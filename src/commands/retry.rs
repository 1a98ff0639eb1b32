//! Retry command implementation.
//! Re-runs only the failed pairs recorded in a previous JSON summary.

use super::compare::report_summary;
use super::models::RetryArgs;
use crate::batch::{run_batch_with, BatchConfig, BatchSummary};
use crate::output::read_summary;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Execute the retry command
///
/// # Returns
/// `None` when the previous run had no failed pair
pub fn execute_retry(args: RetryArgs) -> Result<Option<BatchSummary>> {
    let previous = read_summary(&args.summary).context("Failed to read previous summary")?;

    let (old, new): (Vec<PathBuf>, Vec<PathBuf>) = previous
        .pairs
        .iter()
        .filter(|report| report.outcome.is_failed())
        .map(|report| (report.old.clone(), report.new.clone()))
        .unzip();

    if old.is_empty() {
        info!("No failed pairs in {}", args.summary.display());
        return Ok(None);
    }

    info!("Re-running {} failed pairs", old.len());

    let output_dir = args.output_dir.unwrap_or(previous.output_dir);
    let mut config = BatchConfig::new(output_dir).with_workers(args.workers);
    if let Some(root) = args.source_root {
        config = config.with_source_root(root);
    }

    let summary = run_batch_with(&old, &new, &config).context("Failed to start the batch")?;

    report_summary(&summary, args.summary_json.as_deref(), true)?;

    Ok(Some(summary))
}
