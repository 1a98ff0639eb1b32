//! Batch orchestration over many document pairs.
//!
//! Pairs are split into contiguous chunks up front, one chunk per
//! worker, and each worker walks its chunk in order. The run returns
//! only once every chunk is done.

use super::pair::{process_pair_with, PairContext};
use super::schema::{BatchSummary, PairReport};
use crate::utils::config::{DEFAULT_WORKER_COUNT, DOCUMENT_EXTENSION};
use log::{debug, info, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

/// Setup errors that stop a batch before any pair is processed
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("No metrics documents to compare")]
    EmptyInput,

    #[error("No document pairs could be formed")]
    NoPairs,

    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot list documents in {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// How old and new documents are matched up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingStrategy {
    /// Sort both lists by file name and pair by index
    #[default]
    Positional,
    /// Pair documents that share a file name
    ByName,
}

/// Batch configuration
///
/// There is no default output directory: callers always say where
/// artifacts go.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory receiving one artifact per changed pair
    pub output_dir: PathBuf,

    /// Number of concurrent workers
    pub worker_count: usize,

    /// Pairing rule for old and new documents
    pub pairing: PairingStrategy,

    /// Base directory for relative source names
    pub source_root: Option<PathBuf>,
}

impl BatchConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            worker_count: DEFAULT_WORKER_COUNT,
            pairing: PairingStrategy::default(),
            source_root: None,
        }
    }

    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_pairing(mut self, pairing: PairingStrategy) -> Self {
        self.pairing = pairing;
        self
    }

    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = Some(root.into());
        self
    }

    fn pair_context(&self) -> PairContext {
        PairContext {
            output_dir: self.output_dir.clone(),
            source_root: self.source_root.clone(),
        }
    }
}

/// An old document and the new document it is compared with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPair {
    pub old: PathBuf,
    pub new: PathBuf,
}

/// Pairs formed from two document lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pairing {
    pub pairs: Vec<DocumentPair>,

    /// Documents left without a counterpart
    pub unpaired: usize,
}

/// List the metrics documents directly inside `dir`, sorted by file name
///
/// # Errors
/// * `BatchError::Discovery` - Directory missing or unreadable
pub fn collect_documents(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| BatchError::Discovery {
            path: dir.to_path_buf(),
            source,
        })?;

        let is_document = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext == DOCUMENT_EXTENSION);
        if is_document {
            documents.push(entry.into_path());
        }
    }

    debug!("Found {} documents in {}", documents.len(), dir.display());
    Ok(documents)
}

/// Match old documents to new documents
pub fn pair_documents(
    mut old: Vec<PathBuf>,
    mut new: Vec<PathBuf>,
    strategy: PairingStrategy,
) -> Pairing {
    old.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    new.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    match strategy {
        PairingStrategy::Positional => pair_by_position(old, new),
        PairingStrategy::ByName => pair_by_name(old, new),
    }
}

fn pair_by_position(old: Vec<PathBuf>, new: Vec<PathBuf>) -> Pairing {
    let unpaired = old.len().abs_diff(new.len());
    if unpaired > 0 {
        warn!(
            "Old and new document sets differ in size ({} vs {}); positional pairing may misalign them",
            old.len(),
            new.len()
        );
    }

    let pairs: Vec<DocumentPair> = old
        .into_iter()
        .zip(new)
        .map(|(old, new)| DocumentPair { old, new })
        .collect();

    let misaligned = pairs
        .iter()
        .filter(|pair| pair.old.file_name() != pair.new.file_name())
        .inspect(|pair| debug!("Misaligned pair: {} / {}", pair.old.display(), pair.new.display()))
        .count();
    if misaligned > 0 {
        warn!(
            "{} positional pairs have different file names; consider pairing by name",
            misaligned
        );
    }

    Pairing { pairs, unpaired }
}

fn pair_by_name(old: Vec<PathBuf>, new: Vec<PathBuf>) -> Pairing {
    let mut new_by_name: BTreeMap<OsString, PathBuf> = new
        .into_iter()
        .filter_map(|path| Some((path.file_name()?.to_os_string(), path)))
        .collect();

    let mut pairing = Pairing::default();
    for old in old {
        match old.file_name().and_then(|name| new_by_name.remove(name)) {
            Some(new) => pairing.pairs.push(DocumentPair { old, new }),
            None => {
                debug!("No new document for {}", old.display());
                pairing.unpaired += 1;
            }
        }
    }

    for orphan in new_by_name.values() {
        debug!("No old document for {}", orphan.display());
    }
    pairing.unpaired += new_by_name.len();

    if pairing.unpaired > 0 {
        warn!("{} documents have no counterpart", pairing.unpaired);
    }

    pairing
}

/// Split `items` into contiguous chunks of `ceil(len / worker_count)` items
///
/// Every item lands in exactly one chunk; only the last chunk may be shorter.
pub fn partition<T>(items: &[T], worker_count: usize) -> Vec<&[T]> {
    if items.is_empty() || worker_count == 0 {
        return Vec::new();
    }
    let chunk_size = items.len().div_ceil(worker_count);
    items.chunks(chunk_size).collect()
}

/// Run the batch with default pairing into `output_dir`
///
/// # Errors
/// See [`run_batch_with`]
pub fn run_batch(
    old_documents: &[PathBuf],
    new_documents: &[PathBuf],
    output_dir: &Path,
    worker_count: usize,
) -> Result<BatchSummary, BatchError> {
    let config = BatchConfig::new(output_dir).with_workers(worker_count);
    run_batch_with(old_documents, new_documents, &config)
}

/// Run the batch
///
/// # Arguments
/// * `old_documents` - Documents computed before the grammar update
/// * `new_documents` - Documents computed after the grammar update
/// * `config` - Output directory, worker count, pairing rule
///
/// # Returns
/// Summary of every processed pair; pair failures are reported there
///
/// # Errors
/// * `BatchError::EmptyInput` - Either list is empty
/// * `BatchError::NoPairs` - Pairing produced nothing
/// * `BatchError::InvalidWorkerCount` - `worker_count` is 0
/// * `BatchError::OutputDir` - Output directory cannot be created
/// * `BatchError::WorkerPool` - Worker threads cannot be started
pub fn run_batch_with(
    old_documents: &[PathBuf],
    new_documents: &[PathBuf],
    config: &BatchConfig,
) -> Result<BatchSummary, BatchError> {
    let start_time = Instant::now();

    if config.worker_count == 0 {
        return Err(BatchError::InvalidWorkerCount);
    }
    if old_documents.is_empty() || new_documents.is_empty() {
        return Err(BatchError::EmptyInput);
    }

    let pairing = pair_documents(old_documents.to_vec(), new_documents.to_vec(), config.pairing);
    if pairing.pairs.is_empty() {
        return Err(BatchError::NoPairs);
    }

    // Created once here, before any worker can race on it
    std::fs::create_dir_all(&config.output_dir).map_err(|source| BatchError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let pool = ThreadPoolBuilder::new()
        .num_threads(config.worker_count)
        .thread_name(|index| format!("minimal-tests-{}", index))
        .build()?;

    let chunks = partition(&pairing.pairs, config.worker_count);
    let context = config.pair_context();

    info!(
        "Processing {} pairs in {} chunks on {} workers",
        pairing.pairs.len(),
        chunks.len(),
        config.worker_count
    );

    let per_chunk: Vec<Vec<PairReport>> = pool.install(|| {
        chunks
            .par_iter()
            .with_max_len(1)
            .enumerate()
            .map(|(index, chunk)| process_chunk(index, chunk, &context))
            .collect()
    });

    let reports: Vec<PairReport> = per_chunk.into_iter().flatten().collect();
    let mut summary = BatchSummary::from_reports(
        reports,
        config.output_dir.clone(),
        config.worker_count,
        pairing.unpaired,
    );
    summary.duration_ms = start_time.elapsed().as_millis();

    info!(
        "Batch complete: {} extracted, {} skipped, {} failed ({} ms)",
        summary.extracted,
        summary.skipped(),
        summary.failed,
        summary.duration_ms
    );

    Ok(summary)
}

fn process_chunk(index: usize, chunk: &[DocumentPair], context: &PairContext) -> Vec<PairReport> {
    debug!("Worker chunk {}: {} pairs", index, chunk.len());

    chunk
        .iter()
        .map(|pair| PairReport {
            old: pair.old.clone(),
            new: pair.new.clone(),
            outcome: process_pair_with(&pair.old, &pair.new, context),
        })
        .collect()
}
