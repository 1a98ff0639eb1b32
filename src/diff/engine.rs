//! Core diff engine implementation.
//! Walks two Space trees side by side and records every metric that differs.

use crate::parser::schema::{MetricsDocument, Space, SpaceNode};
use log::debug;
use serde_json::{Number, Value};
use std::collections::{BTreeMap, BTreeSet};

use super::path::ChangeLocation;
use super::schema::{Change, ChangeKind, ChangeSet};

/// Compare two metrics documents
///
/// Child Spaces are paired by position. Metric fields are compared by
/// name, so key order never matters, and arrays inside metric values are
/// compared as multisets. A child list that grew or shrank is reported as
/// `SpaceAdded`/`SpaceRemoved` after the common prefix has been compared.
///
/// # Arguments
/// * `old` - Document computed before the grammar update
/// * `new` - Document computed after the grammar update
///
/// # Returns
/// Every difference in traversal order; empty when the trees match
///
/// # Example
/// ```ignore
/// let old = load_document("old/a.c.json")?;
/// let new = load_document("new/a.c.json")?;
/// let changes = diff(&old, &new);
/// ```
pub fn diff(old: &MetricsDocument, new: &MetricsDocument) -> ChangeSet {
    let mut changes = ChangeSet::new();
    diff_node(old, new, &ChangeLocation::root(), &mut changes);

    let shape_changes = changes.shape_mismatches().count();
    debug!(
        "Diffed {}: {} changes ({} shape changes)",
        old.name,
        changes.len(),
        shape_changes
    );

    changes
}

fn diff_node<A, B>(old: &A, new: &B, location: &ChangeLocation, changes: &mut ChangeSet)
where
    A: SpaceNode,
    B: SpaceNode,
{
    diff_entries(old.metrics(), new.metrics(), location, changes);
    diff_children(old.children(), new.children(), location, changes);
}

fn diff_children(old: &[Space], new: &[Space], location: &ChangeLocation, changes: &mut ChangeSet) {
    for (index, (old_child, new_child)) in old.iter().zip(new).enumerate() {
        diff_node(old_child, new_child, &location.space(index), changes);
    }

    if old.len() != new.len() {
        debug!(
            "Shape mismatch at {}: {} old vs {} new child spaces",
            location,
            old.len(),
            new.len()
        );
    }

    for (index, removed) in old.iter().enumerate().skip(new.len()) {
        changes.push(Change {
            location: location.space(index),
            kind: ChangeKind::SpaceRemoved,
            old_value: serde_json::to_value(removed).ok(),
            new_value: None,
        });
    }

    // An added child has no old counterpart, so it is attributed to its parent
    for added in new.iter().skip(old.len()) {
        changes.push(Change {
            location: location.clone(),
            kind: ChangeKind::SpaceAdded,
            old_value: None,
            new_value: serde_json::to_value(added).ok(),
        });
    }
}

fn diff_entries<'a>(
    old: impl IntoIterator<Item = (&'a String, &'a Value)>,
    new: impl IntoIterator<Item = (&'a String, &'a Value)>,
    location: &ChangeLocation,
    changes: &mut ChangeSet,
) {
    let old: BTreeMap<&str, &Value> = old.into_iter().map(|(k, v)| (k.as_str(), v)).collect();
    let new: BTreeMap<&str, &Value> = new.into_iter().map(|(k, v)| (k.as_str(), v)).collect();
    let keys: BTreeSet<&str> = old.keys().chain(new.keys()).copied().collect();

    for key in keys {
        let at = location.field(key);
        match (old.get(key), new.get(key)) {
            (Some(old_value), Some(new_value)) => diff_values(old_value, new_value, &at, changes),
            (Some(old_value), None) => changes.push(Change {
                location: at,
                kind: ChangeKind::FieldRemoved,
                old_value: Some((*old_value).clone()),
                new_value: None,
            }),
            (None, Some(new_value)) => changes.push(Change {
                location: at,
                kind: ChangeKind::FieldAdded,
                old_value: None,
                new_value: Some((*new_value).clone()),
            }),
            (None, None) => {}
        }
    }
}

fn diff_values(old: &Value, new: &Value, location: &ChangeLocation, changes: &mut ChangeSet) {
    match (old, new) {
        (Value::Object(old_map), Value::Object(new_map)) => {
            diff_entries(old_map, new_map, location, changes)
        }
        _ if values_equal(old, new) => {}
        _ => changes.push(Change {
            location: location.clone(),
            kind: ChangeKind::ValueChanged,
            old_value: Some(old.clone()),
            new_value: Some(new.clone()),
        }),
    }
}

/// Structural equality that ignores key order, array order, and integer/float spelling
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => multiset_equal(x, y),
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    x.as_f64() == y.as_f64()
}

fn multiset_equal(x: &[Value], y: &[Value]) -> bool {
    if x.len() != y.len() {
        return false;
    }

    let mut unmatched: Vec<&Value> = y.iter().collect();
    for item in x {
        match unmatched.iter().position(|c| values_equal(item, c)) {
            Some(found) => {
                unmatched.swap_remove(found);
            }
            None => return false,
        }
    }
    true
}
