//! Input JSON schema definitions for metrics documents.
//!
//! A metrics document is what the analyzer writes for one source file:
//! a root carrying the file name plus a tree of Spaces. Every key of a
//! Space that is not one of its descriptors is a metric field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Metric fields of a Space, keyed by metric name.
///
/// A `BTreeMap` so that comparing two Spaces never depends on the key
/// order the analyzer happened to emit.
pub type MetricFields = BTreeMap<String, Value>;

/// One analyzed source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsDocument {
    /// Path of the source file the metrics were computed from
    pub name: String,

    /// First line of the whole file (present when the analyzer emits a unit space)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line: Option<usize>,

    /// Last line of the whole file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,

    /// Kind of the root space (usually "unit")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Top-level code regions
    pub spaces: Vec<Space>,

    /// Metrics of the file as a whole
    #[serde(flatten)]
    pub metrics: MetricFields,
}

/// A named, line-bounded code region (module, class, function)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    /// Region name, absent when the analyzer could not name it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Region kind, e.g. "function" or "class"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// First line, 1-based
    pub start_line: usize,

    /// Last line, 1-based and inclusive
    pub end_line: usize,

    /// Nested regions
    #[serde(default)]
    pub spaces: Vec<Space>,

    /// Metric values of this region
    #[serde(flatten)]
    pub metrics: MetricFields,
}

/// Shared view over the document root and its Spaces.
///
/// The root and a nested Space differ only in whether their line range
/// is mandatory, so diffing and path walking treat them alike.
pub trait SpaceNode {
    /// 1-based inclusive line range, if known
    fn line_range(&self) -> Option<(usize, usize)>;

    /// Child Spaces in document order
    fn children(&self) -> &[Space];

    /// Metric fields of this node
    fn metrics(&self) -> &MetricFields;
}

impl SpaceNode for MetricsDocument {
    fn line_range(&self) -> Option<(usize, usize)> {
        match (self.start_line, self.end_line) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    fn children(&self) -> &[Space] {
        &self.spaces
    }

    fn metrics(&self) -> &MetricFields {
        &self.metrics
    }
}

impl SpaceNode for Space {
    fn line_range(&self) -> Option<(usize, usize)> {
        Some((self.start_line, self.end_line))
    }

    fn children(&self) -> &[Space] {
        &self.spaces
    }

    fn metrics(&self) -> &MetricFields {
        &self.metrics
    }
}

impl Space {
    /// Create a leaf Space with no metrics
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            name: None,
            kind: None,
            start_line,
            end_line,
            spaces: Vec::new(),
            metrics: MetricFields::new(),
        }
    }

    /// Builder-style metric setter
    pub fn with_metric(mut self, name: impl Into<String>, value: Value) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    /// Builder-style child setter
    pub fn with_child(mut self, child: Space) -> Self {
        self.spaces.push(child);
        self
    }
}

impl MetricsDocument {
    /// Create a document with no root lines and no root metrics
    pub fn new(name: impl Into<String>, spaces: Vec<Space>) -> Self {
        Self {
            name: name.into(),
            start_line: None,
            end_line: None,
            kind: None,
            spaces,
            metrics: MetricFields::new(),
        }
    }
}
