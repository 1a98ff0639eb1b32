use crate::batch::{BatchConfig, PairingStrategy};
use crate::utils::config::DEFAULT_WORKER_COUNT;
use std::path::PathBuf;

/// Arguments for the compare command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CompareArgs {
    /// Directory of metrics documents computed before the update
    pub old_dir: PathBuf,

    /// Directory of metrics documents computed after the update
    pub new_dir: PathBuf,

    /// Directory receiving the minimal tests
    pub output_dir: PathBuf,

    /// Number of concurrent workers
    pub workers: usize,

    /// Pair documents by file name instead of by position
    pub pair_by_name: bool,

    /// Base directory for relative source names
    pub source_root: Option<PathBuf>,

    /// Path to write the JSON summary (optional)
    pub summary_json: Option<PathBuf>,

    /// Print the terminal summary
    pub print_summary: bool,
}

impl CompareArgs {
    pub fn new(old_dir: PathBuf, new_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            old_dir,
            new_dir,
            output_dir,
            workers: DEFAULT_WORKER_COUNT,
            pair_by_name: false,
            source_root: None,
            summary_json: None,
            print_summary: true,
        }
    }

    /// Batch configuration described by these arguments
    pub fn batch_config(&self) -> BatchConfig {
        let pairing = if self.pair_by_name {
            PairingStrategy::ByName
        } else {
            PairingStrategy::Positional
        };

        let config = BatchConfig::new(&self.output_dir)
            .with_workers(self.workers)
            .with_pairing(pairing);

        match &self.source_root {
            Some(root) => config.with_source_root(root),
            None => config,
        }
    }
}

/// Arguments for the single-pair command
#[derive(Debug, Clone)]
pub struct PairArgs {
    /// Old metrics document
    pub old: PathBuf,

    /// New metrics document
    pub new: PathBuf,

    /// Directory receiving the minimal test
    pub output_dir: PathBuf,

    /// Base directory for relative source names
    pub source_root: Option<PathBuf>,
}

/// Arguments for the retry command
#[derive(Debug, Clone)]
pub struct RetryArgs {
    /// JSON summary of a previous run
    pub summary: PathBuf,

    /// Directory receiving the minimal tests (defaults to the previous run's)
    pub output_dir: Option<PathBuf>,

    /// Number of concurrent workers
    pub workers: usize,

    /// Base directory for relative source names
    pub source_root: Option<PathBuf>,

    /// Path to write the new JSON summary (optional)
    pub summary_json: Option<PathBuf>,
}
