//! Structural diff of two metrics documents.
//!
//! This module compares two metrics documents (before vs after a grammar
//! update) and reports which metric fields of which Spaces changed.
//!
//! # Example
//! ```ignore
//! use metrics_minimal_tests::diff::diff;
//! use metrics_minimal_tests::parser::load_document;
//!
//! let old = load_document("old/a.c.json")?;
//! let new = load_document("new/a.c.json")?;
//! for change in &diff(&old, &new) {
//!     println!("{:?} at {}", change.kind, change.location);
//! }
//! ```

mod engine;
mod path;
mod schema;

// Public API exports
pub use engine::{diff, values_equal};
pub use path::{ChangeLocation, PathParseError, PathStep};
pub use schema::{Change, ChangeKind, ChangeSet};
