//! Batch summary output.
//!
//! Writes the summary as JSON for later re-runs and renders a short
//! colored report for the terminal.

use crate::batch::{BatchSummary, Outcome};
use crate::utils::error::OutputError;
use colored::*;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a batch summary to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_summary(summary: &BatchSummary, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing summary to: {}", output_path.display());

    super::validate_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, summary).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Read a batch summary back, e.g. to re-run its failures
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<BatchSummary, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading summary from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let summary: BatchSummary =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(summary)
}

/// Render a human-readable summary for the terminal
pub fn render_terminal_summary(summary: &BatchSummary) -> String {
    let mut out = String::new();

    out.push_str(&render_header(summary));
    out.push_str(&render_counts(summary));
    out.push_str(&render_failures(summary));
    out.push_str(&render_status(summary));

    out
}

/// One-line rendering of a single pair outcome
pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Extracted { .. } => outcome.to_string().green().to_string(),
        Outcome::Skipped { .. } => outcome.to_string().dimmed().to_string(),
        Outcome::Failed(_) => outcome.to_string().red().to_string(),
    }
}

fn render_header(summary: &BatchSummary) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&"Minimal Test Extraction Summary".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!("Output:  {}\n", summary.output_dir.display()));
    out.push_str(&format!(
        "Workers: {}   Pairs: {}   Time: {} ms\n",
        summary.worker_count, summary.total_pairs, summary.duration_ms
    ));
    out.push_str("---------------------------------------------------\n\n");
    out
}

fn render_counts(summary: &BatchSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  Extracted:            {} ({} minimal tests)\n",
        summary.extracted, summary.spans_written
    ));
    out.push_str(&format!("  Identical:            {}\n", summary.identical));
    out.push_str(&format!("  Undecodable source:   {}\n", summary.undecodable));
    out.push_str(&format!("  No resolvable spans:  {}\n", summary.no_spans));
    out.push_str(&format!("  Failed:               {}\n", summary.failed));
    if summary.unpaired > 0 {
        out.push_str(&format!("  Unpaired documents:   {}\n", summary.unpaired));
    }
    out
}

fn render_failures(summary: &BatchSummary) -> String {
    let mut out = String::new();

    if !summary.failures.is_empty() {
        out.push_str("\nFailed pairs:\n");
        for failed in &summary.failures {
            out.push_str(&format!(
                "  {} {:?}: {}\n",
                failed.identifier.yellow(),
                failed.failure.kind,
                failed.failure.message
            ));
        }
    }
    out
}

fn render_status(summary: &BatchSummary) -> String {
    let mut out = String::new();
    out.push_str("\n---------------------------------------------------\n");
    let status = if summary.failed > 0 {
        format!("STATUS: {} PAIRS FAILED", summary.failed).red().bold()
    } else if summary.extracted > 0 {
        format!("STATUS: {} FILES WITH DIFFERENCES", summary.extracted)
            .yellow()
            .bold()
    } else {
        "STATUS: NO DIFFERENCES".green().bold()
    };
    out.push_str(&status.to_string());
    out.push('\n');
    out
}
