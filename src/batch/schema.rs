//! Schema definitions for per-pair outcomes and the batch summary.
//!
//! The summary is what the `compare` command prints and optionally
//! writes as JSON, so it stays serializable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Why a pair produced no artifact without being a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Both documents describe the same tree
    IdenticalDocuments,
    /// The source file is not valid UTF-8
    UndecodableSource,
    /// Changes exist but none maps to a source span
    NoResolvableSpans,
}

/// Category of a pair failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// One of the two documents is malformed or unreadable
    Parse,
    /// The source file referenced by the old document cannot be read
    SourceUnreadable,
    /// The artifact cannot be written
    WriteFailed,
}

/// A pair failure with its rendered cause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

/// Result of processing one document pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// No artifact, not an error
    Skipped { reason: SkipReason },
    /// Artifact written
    Extracted { spans: usize, artifact: PathBuf },
    /// The pair could not be processed
    Failed(Failure),
}

impl Outcome {
    pub fn skipped(reason: SkipReason) -> Self {
        Outcome::Skipped { reason }
    }

    pub fn failed(kind: FailureKind, error: impl fmt::Display) -> Self {
        Outcome::Failed(Failure {
            kind,
            message: error.to_string(),
        })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Skipped { reason } => write!(f, "skipped ({:?})", reason),
            Outcome::Extracted { spans, artifact } => {
                write!(f, "extracted {} spans to {}", spans, artifact.display())
            }
            Outcome::Failed(failure) => write!(f, "failed ({:?}): {}", failure.kind, failure.message),
        }
    }
}

/// One processed pair, as recorded in the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairReport {
    /// Old metrics document
    pub old: PathBuf,

    /// New metrics document
    pub new: PathBuf,

    /// What happened
    pub outcome: Outcome,
}

/// A failed pair, kept so the failures alone can be re-run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedPair {
    /// Identifier of the pair (the new document path)
    pub identifier: String,

    /// Failure details
    pub failure: Failure,
}

/// Aggregate result of a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Schema version for the summary format
    pub summary_version: String,

    /// Timestamp when the run finished
    pub generated_at: String,

    /// Output directory the artifacts were written to
    pub output_dir: PathBuf,

    /// Number of workers used
    pub worker_count: usize,

    /// Pairs processed
    pub total_pairs: usize,

    /// Pairs skipped because the documents were identical
    pub identical: usize,

    /// Pairs skipped because the source was not valid text
    pub undecodable: usize,

    /// Pairs skipped because no change mapped to a span
    pub no_spans: usize,

    /// Pairs that produced an artifact
    pub extracted: usize,

    /// Pairs that failed
    pub failed: usize,

    /// Total snippets written across all artifacts
    pub spans_written: usize,

    /// Documents left without a counterpart by the pairing step
    pub unpaired: usize,

    /// Failed pairs, in input order
    pub failures: Vec<FailedPair>,

    /// Every processed pair, in input order
    pub pairs: Vec<PairReport>,

    /// Wall-clock duration of the run
    pub duration_ms: u128,
}

impl BatchSummary {
    /// Aggregate per-pair reports into counts
    pub fn from_reports(
        reports: Vec<PairReport>,
        output_dir: PathBuf,
        worker_count: usize,
        unpaired: usize,
    ) -> Self {
        let mut summary = Self {
            summary_version: crate::utils::config::SUMMARY_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            output_dir,
            worker_count,
            total_pairs: reports.len(),
            identical: 0,
            undecodable: 0,
            no_spans: 0,
            extracted: 0,
            failed: 0,
            spans_written: 0,
            unpaired,
            failures: Vec::new(),
            pairs: Vec::new(),
            duration_ms: 0,
        };

        for report in &reports {
            match &report.outcome {
                Outcome::Skipped { reason } => match reason {
                    SkipReason::IdenticalDocuments => summary.identical += 1,
                    SkipReason::UndecodableSource => summary.undecodable += 1,
                    SkipReason::NoResolvableSpans => summary.no_spans += 1,
                },
                Outcome::Extracted { spans, .. } => {
                    summary.extracted += 1;
                    summary.spans_written += spans;
                }
                Outcome::Failed(failure) => {
                    summary.failed += 1;
                    summary.failures.push(FailedPair {
                        identifier: report.new.display().to_string(),
                        failure: failure.clone(),
                    });
                }
            }
        }

        summary.pairs = reports;
        summary
    }

    /// Pairs skipped for any reason
    pub fn skipped(&self) -> usize {
        self.identical + self.undecodable + self.no_spans
    }
}
