//! Minimal-test artifact writer.
//!
//! Copies the source lines of every changed region into one plain-text
//! file per document pair.

use crate::spans::LineSpan;
use crate::utils::config::MINIMAL_TEST_MARKER;
use crate::utils::error::ExtractError;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of an extraction attempt that did not hit an I/O error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Artifact written with one block per span
    Written { path: PathBuf, spans: usize },
    /// Source is not valid UTF-8; nothing written
    Undecodable,
    /// No span to extract; nothing written and the source was not read
    NothingToWrite,
}

/// Write the minimal-test artifact for one pair
///
/// # Arguments
/// * `source_path` - Source file the old document was computed from
/// * `spans` - Unique spans to copy
/// * `artifact_path` - File to create or overwrite
///
/// # Errors
/// * `ExtractError::SourceUnreadable` - Source cannot be read
/// * `ExtractError::WriteFailed` - Artifact cannot be written
pub fn extract(
    source_path: &Path,
    spans: &BTreeSet<LineSpan>,
    artifact_path: &Path,
) -> Result<Extraction, ExtractError> {
    if spans.is_empty() {
        return Ok(Extraction::NothingToWrite);
    }

    let bytes = fs::read(source_path).map_err(|source| ExtractError::SourceUnreadable {
        path: source_path.to_path_buf(),
        source,
    })?;

    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(e) => {
            warn!(
                "Skipping {}: not valid UTF-8 ({})",
                source_path.display(),
                e.utf8_error()
            );
            return Ok(Extraction::Undecodable);
        }
    };

    let content = render_minimal_tests(&source, spans);

    fs::write(artifact_path, content).map_err(|source| ExtractError::WriteFailed {
        path: artifact_path.to_path_buf(),
        source,
    })?;

    debug!(
        "Wrote {} minimal tests to {}",
        spans.len(),
        artifact_path.display()
    );

    Ok(Extraction::Written {
        path: artifact_path.to_path_buf(),
        spans: spans.len(),
    })
}

/// Render the artifact body: one marker line, the verbatim lines, and a blank line per span
pub fn render_minimal_tests(source: &str, spans: &BTreeSet<LineSpan>) -> String {
    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    let mut out = String::new();

    for span in spans {
        let end = span.end.min(lines.len());
        if end < span.end {
            warn!(
                "Span {}..{} runs past the end of the source ({} lines)",
                span.start,
                span.end,
                lines.len()
            );
        }

        out.push_str(MINIMAL_TEST_MARKER);
        out.push('\n');
        for line in lines.get(span.start..end).unwrap_or_default() {
            out.push_str(line);
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Artifact path for a pair: the new document's file stem inside `output_dir`
///
/// # Errors
/// * `ExtractError::NoArtifactName` - The document path has no file name
pub fn artifact_path(output_dir: &Path, new_document: &Path) -> Result<PathBuf, ExtractError> {
    new_document
        .file_stem()
        .map(|stem| output_dir.join(stem))
        .ok_or_else(|| ExtractError::NoArtifactName(new_document.to_path_buf()))
}
