//! Maps change locations back to source line spans.
//!
//! Locations are always walked against the OLD document: its line numbers
//! are the ones that match the old source checkout being snippeted.

use super::line_span::LineSpan;
use crate::diff::{ChangeLocation, ChangeSet, PathStep};
use crate::parser::schema::{MetricsDocument, SpaceNode};
use log::debug;
use serde_json::Value;
use std::collections::BTreeSet;
use thiserror::Error;

/// A location that cannot be walked against the old document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{location}: space index {index} out of range ({len} spaces)")]
    SpaceIndexOutOfRange {
        location: ChangeLocation,
        index: usize,
        len: usize,
    },

    #[error("{location}: field {field:?} not present in old document")]
    MissingField {
        location: ChangeLocation,
        field: String,
    },

    #[error("{location}: a space step cannot follow a field step")]
    SpaceAfterField { location: ChangeLocation },

    #[error("{location}: document root carries no line range")]
    RootHasNoLines { location: ChangeLocation },
}

/// Spans found for one document pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpanResolution {
    /// Unique spans, ordered by start then end
    pub spans: BTreeSet<LineSpan>,

    /// Locations that were dropped
    pub unresolved: Vec<ResolveError>,
}

/// Resolve every change to a span in the old document
///
/// Unresolvable locations are skipped one by one; they never fail the
/// whole resolution. Identical spans collapse into one.
pub fn resolve(old: &MetricsDocument, changes: &ChangeSet) -> SpanResolution {
    let mut resolution = SpanResolution::default();

    for change in changes {
        match resolve_location(old, &change.location) {
            Ok(Some(span)) => {
                resolution.spans.insert(span);
            }
            Ok(None) => debug!("{} covers no source line", change.location),
            Err(e) => {
                debug!("Dropping location: {}", e);
                resolution.unresolved.push(e);
            }
        }
    }

    debug!(
        "Resolved {} changes of {} into {} spans ({} dropped)",
        changes.len(),
        old.name,
        resolution.spans.len(),
        resolution.unresolved.len()
    );

    resolution
}

/// Resolve a single location
///
/// The span is the one of the innermost Space the path reaches; field
/// steps after it only have to exist.
///
/// # Returns
/// `Ok(None)` when the Space reached covers no line
///
/// # Errors
/// Any [`ResolveError`] describing the first step that cannot be taken
pub fn resolve_location(
    old: &MetricsDocument,
    location: &ChangeLocation,
) -> Result<Option<LineSpan>, ResolveError> {
    let mut node: &dyn SpaceNode = old;
    let mut field_value: Option<&Value> = None;

    for step in location.steps() {
        match step {
            PathStep::Space(index) => {
                if field_value.is_some() {
                    return Err(ResolveError::SpaceAfterField {
                        location: location.clone(),
                    });
                }
                let children = node.children();
                node = children
                    .get(*index)
                    .ok_or_else(|| ResolveError::SpaceIndexOutOfRange {
                        location: location.clone(),
                        index: *index,
                        len: children.len(),
                    })?;
            }
            PathStep::Field(name) => {
                let next = match field_value {
                    None => node.metrics().get(name),
                    Some(Value::Object(map)) => map.get(name),
                    Some(_) => None,
                };
                field_value = Some(next.ok_or_else(|| ResolveError::MissingField {
                    location: location.clone(),
                    field: name.clone(),
                })?);
            }
        }
    }

    let (start_line, end_line) = node.line_range().ok_or_else(|| ResolveError::RootHasNoLines {
        location: location.clone(),
    })?;

    Ok(LineSpan::from_space_lines(start_line, end_line))
}
