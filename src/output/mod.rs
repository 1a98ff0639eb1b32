//! Output writers for minimal tests and batch summaries.
//!
//! This module handles writing data to disk:
//! - Minimal-test artifacts (one per changed pair)
//! - JSON batch summaries
//! - Terminal summaries

pub mod snippet;
pub mod summary;

// Re-export main functions
pub use snippet::{artifact_path, extract, render_minimal_tests, Extraction};
pub use summary::{read_summary, render_outcome, render_terminal_summary, write_summary};

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
