//! Schema definitions for structural diffs.
//!
//! Defines the structures that represent differences between two metrics documents.

use super::path::ChangeLocation;
use serde_json::Value;

/// What happened at a [`ChangeLocation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Same field on both sides, different value
    ValueChanged,
    /// Field only present in the new document
    FieldAdded,
    /// Field only present in the old document
    FieldRemoved,
    /// The new document has an extra child Space under this location
    SpaceAdded,
    /// This child Space is missing from the new document
    SpaceRemoved,
}

impl ChangeKind {
    /// Whether this change is a tree shape change rather than a value change
    pub fn is_shape_change(self) -> bool {
        matches!(self, ChangeKind::SpaceAdded | ChangeKind::SpaceRemoved)
    }
}

/// A single difference between two documents
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// Where the difference is
    pub location: ChangeLocation,

    /// What kind of difference it is
    pub kind: ChangeKind,

    /// Value on the old side (absent for additions)
    pub old_value: Option<Value>,

    /// Value on the new side (absent for removals)
    pub new_value: Option<Value>,
}

/// Every difference found between two documents, in traversal order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    /// Changes where the Space tree itself changed shape.
    ///
    /// These are a soft signal: a grammar update that makes the analyzer
    /// find a new nested region is exactly what the batch is looking for.
    pub fn shape_mismatches(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(|c| c.kind.is_shape_change())
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

impl FromIterator<Change> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = Change>>(iter: I) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}
