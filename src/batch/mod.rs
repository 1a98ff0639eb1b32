//! Concurrent processing of many document pairs.
//!
//! # Example
//! ```ignore
//! use metrics_minimal_tests::batch::{collect_documents, run_batch};
//!
//! let old = collect_documents(Path::new("metrics-old"))?;
//! let new = collect_documents(Path::new("metrics-new"))?;
//! let summary = run_batch(&old, &new, Path::new("minimal-tests"), 4)?;
//! println!("{} artifacts written", summary.extracted);
//! ```

mod orchestrator;
mod pair;
mod schema;

pub use orchestrator::{
    collect_documents, pair_documents, partition, run_batch, run_batch_with, BatchConfig,
    BatchError, DocumentPair, Pairing, PairingStrategy,
};
pub use pair::{process_pair, process_pair_with, PairContext};
pub use schema::{
    BatchSummary, FailedPair, Failure, FailureKind, Outcome, PairReport, SkipReason,
};
