//! Metrics Minimal Tests CLI
//!
//! Diffs source-metrics reports computed before and after a grammar
//! update and extracts minimal tests for every changed region.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use metrics_minimal_tests::commands::{
    display_version, execute_compare, execute_pair, execute_retry, CompareArgs, PairArgs,
    RetryArgs,
};
use metrics_minimal_tests::utils::config::DEFAULT_WORKER_COUNT;

/// Metrics Minimal Tests - find what a grammar update changed
#[derive(Parser, Debug)]
#[command(name = "minimal-tests")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two directories of metrics documents
    Compare {
        /// Directory of metrics computed before the update
        #[arg(long)]
        old: PathBuf,

        /// Directory of metrics computed after the update
        #[arg(long)]
        new: PathBuf,

        /// Directory receiving the minimal tests
        #[arg(short, long)]
        output: PathBuf,

        /// Number of concurrent workers
        #[arg(short = 'j', long, default_value_t = DEFAULT_WORKER_COUNT)]
        workers: usize,

        /// Pair documents by file name instead of by sorted position
        #[arg(long)]
        pair_by_name: bool,

        /// Base directory for relative source file names
        #[arg(long, env = "MINIMAL_TESTS_SOURCE_ROOT")]
        source_root: Option<PathBuf>,

        /// Path to write the JSON summary
        #[arg(long)]
        summary_json: Option<PathBuf>,

        /// Do not print the terminal summary
        #[arg(long)]
        quiet: bool,
    },

    /// Process a single pair of metrics documents
    Pair {
        /// Metrics document computed before the update
        #[arg(long)]
        old: PathBuf,

        /// Metrics document computed after the update
        #[arg(long)]
        new: PathBuf,

        /// Directory receiving the minimal test
        #[arg(short, long)]
        output: PathBuf,

        /// Base directory for relative source file names
        #[arg(long, env = "MINIMAL_TESTS_SOURCE_ROOT")]
        source_root: Option<PathBuf>,
    },

    /// Re-run the failed pairs of a previous JSON summary
    Retry {
        /// JSON summary written by a previous compare
        #[arg(short, long)]
        summary: PathBuf,

        /// Directory receiving the minimal tests (defaults to the previous one)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of concurrent workers
        #[arg(short = 'j', long, default_value_t = DEFAULT_WORKER_COUNT)]
        workers: usize,

        /// Base directory for relative source file names
        #[arg(long, env = "MINIMAL_TESTS_SOURCE_ROOT")]
        source_root: Option<PathBuf>,

        /// Path to write the new JSON summary
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Compare {
            old,
            new,
            output,
            workers,
            pair_by_name,
            source_root,
            summary_json,
            quiet,
        } => {
            let args = CompareArgs {
                workers,
                pair_by_name,
                source_root,
                summary_json,
                print_summary: !quiet,
                ..CompareArgs::new(old, new, output)
            };

            execute_compare(args)?;
        }

        Commands::Pair {
            old,
            new,
            output,
            source_root,
        } => {
            execute_pair(PairArgs {
                old,
                new,
                output_dir: output,
                source_root,
            })?;
        }

        Commands::Retry {
            summary,
            output,
            workers,
            source_root,
            summary_json,
        } => {
            execute_retry(RetryArgs {
                summary,
                output_dir: output,
                workers,
                source_root,
                summary_json,
            })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
