//! Per-pair pipeline: load, diff, resolve, extract.
//!
//! This is where errors stop. Whatever goes wrong with one pair becomes
//! an [`Outcome`] and the rest of the batch carries on.

use super::schema::{FailureKind, Outcome, SkipReason};
use crate::diff::diff;
use crate::output::snippet::{artifact_path, extract, Extraction};
use crate::parser::load_document;
use crate::spans::resolve;
use crate::utils::error::{ExtractError, ParseError};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where a pair's inputs and outputs live
#[derive(Debug, Clone)]
pub struct PairContext {
    /// Directory receiving the artifact
    pub output_dir: PathBuf,

    /// Base directory for relative source names, if they are not relative to the working directory
    pub source_root: Option<PathBuf>,
}

impl PairContext {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            source_root: None,
        }
    }

    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = Some(root.into());
        self
    }

    /// Path of the source file named by a document
    pub fn source_path(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        match &self.source_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[derive(Error, Debug)]
enum PairError {
    #[error("{}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl PairError {
    fn into_outcome(self) -> Outcome {
        let kind = match &self {
            PairError::Load { .. } => FailureKind::Parse,
            PairError::Extract(ExtractError::SourceUnreadable { .. }) => FailureKind::SourceUnreadable,
            PairError::Extract(_) => FailureKind::WriteFailed,
        };
        Outcome::failed(kind, self)
    }
}

/// Process one document pair, writing the artifact into `output_dir`
///
/// Single-pair entry point, mostly for debugging one file.
pub fn process_pair(old_path: &Path, new_path: &Path, output_dir: &Path) -> Outcome {
    process_pair_with(old_path, new_path, &PairContext::new(output_dir))
}

/// Process one document pair with an explicit context
pub fn process_pair_with(old_path: &Path, new_path: &Path, context: &PairContext) -> Outcome {
    match run_pipeline(old_path, new_path, context) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Pair {} failed: {}", new_path.display(), e);
            e.into_outcome()
        }
    }
}

fn run_pipeline(old_path: &Path, new_path: &Path, context: &PairContext) -> Result<Outcome, PairError> {
    let old = load(old_path)?;
    let new = load(new_path)?;

    let changes = diff(&old, &new);
    if changes.is_empty() {
        debug!("{}: identical documents", new_path.display());
        return Ok(Outcome::skipped(SkipReason::IdenticalDocuments));
    }

    let resolution = resolve(&old, &changes);
    let artifact = artifact_path(&context.output_dir, new_path)?;
    let source = context.source_path(&old.name);

    let outcome = match extract(&source, &resolution.spans, &artifact)? {
        Extraction::Written { path, spans } => Outcome::Extracted {
            spans,
            artifact: path,
        },
        Extraction::Undecodable => Outcome::skipped(SkipReason::UndecodableSource),
        Extraction::NothingToWrite => Outcome::skipped(SkipReason::NoResolvableSpans),
    };

    Ok(outcome)
}

fn load(path: &Path) -> Result<crate::parser::MetricsDocument, PairError> {
    load_document(path).map_err(|source| PairError::Load {
        path: path.to_path_buf(),
        source,
    })
}
