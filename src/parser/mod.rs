//! Metrics document loading and schema definitions.
//!
//! This module handles:
//! - Reading analyzer output from disk
//! - Validating required fields and line ranges
//! - Defining the Space tree schema

pub mod document;
pub mod schema;

// Re-export main types
pub use document::{load_document, parse_document};
pub use schema::{MetricFields, MetricsDocument, Space, SpaceNode};
