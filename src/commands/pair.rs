//! Single-pair command implementation.
//! Runs the pipeline on one old/new document pair, for debugging.

use super::models::PairArgs;
use crate::batch::{process_pair_with, Outcome, PairContext};
use crate::output::render_outcome;
use anyhow::{Context, Result};
use std::fs;

/// Execute the pair command
pub fn execute_pair(args: PairArgs) -> Result<Outcome> {
    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let mut context = PairContext::new(&args.output_dir);
    if let Some(root) = &args.source_root {
        context = context.with_source_root(root);
    }

    let outcome = process_pair_with(&args.old, &args.new, &context);
    println!("{}: {}", args.new.display(), render_outcome(&outcome));

    Ok(outcome)
}
