use crate::utils::config::{DEFAULT_WORKER_COUNT, MINIMAL_TEST_MARKER, SUMMARY_VERSION};

/// Display version information
pub fn display_version() {
    println!("Metrics Minimal Tests v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SUMMARY_VERSION);
    println!();
    println!("Diffs source-metrics reports computed before and after a grammar update");
    println!(
        "and writes a \"{}\" artifact for every changed file ({} workers by default).",
        MINIMAL_TEST_MARKER, DEFAULT_WORKER_COUNT
    );
}
