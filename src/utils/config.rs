//! Configuration and constants for the batch.

/// Workers used when the caller does not ask for a specific count
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Line written before every snippet in a minimal-test artifact
pub const MINIMAL_TEST_MARKER: &str = "Minimal test:";

/// Extension of the metrics documents produced by the analyzer
pub const DOCUMENT_EXTENSION: &str = "json";

/// Current batch summary schema version
pub const SUMMARY_VERSION: &str = "1.0.0";

