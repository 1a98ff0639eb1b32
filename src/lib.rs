//! Metrics Minimal Tests
//!
//! Compares the source-metrics reports of a repository computed before
//! and after a grammar update, finds which code regions changed, and
//! writes a minimal test (the verbatim source lines) for each of them.
//!
//! This crate provides the core implementation for the
//! `minimal-tests` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! minimal-tests compare --old metrics-old --new metrics-new --output minimal-tests
//! minimal-tests --help
//! ```

pub mod batch;
pub mod commands;
pub mod diff;
pub mod output;
pub mod parser;
pub mod spans;
pub mod utils;

pub use batch::{process_pair, run_batch, BatchSummary, Outcome};
