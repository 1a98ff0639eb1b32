//! Metrics document loader.
//!
//! Reads one analyzer output file and validates it before anything
//! downstream gets to see it. A document that fails here never
//! reaches the differ.

use super::schema::{MetricsDocument, Space};
use crate::utils::error::ParseError;
use log::debug;
use serde_json::Value;
use std::path::Path;

/// Load and validate a metrics document from disk
///
/// # Errors
/// * `ParseError::ReadFailed` - File cannot be read
/// * `ParseError::JsonError` - Not JSON, or a Space is missing its line fields
/// * `ParseError::MissingField` - Top-level `name` or `spaces` is absent
/// * `ParseError::InvalidFormat` - A Space ends before it starts
pub fn load_document(path: impl AsRef<Path>) -> Result<MetricsDocument, ParseError> {
    let path = path.as_ref();

    debug!("Reading metrics document from: {}", path.display());

    let raw = std::fs::read(path).map_err(|source| ParseError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_slice(&raw)?;
    let document = parse_document(value)?;

    debug!(
        "Document loaded: {} ({} top-level spaces)",
        document.name,
        document.spaces.len()
    );

    Ok(document)
}

/// Validate an already-decoded JSON value as a metrics document
pub fn parse_document(value: Value) -> Result<MetricsDocument, ParseError> {
    let object = value
        .as_object()
        .ok_or_else(|| ParseError::InvalidFormat("document is not a JSON object".to_string()))?;

    if !object.get("name").is_some_and(Value::is_string) {
        return Err(ParseError::MissingField("name"));
    }
    if !object.get("spaces").is_some_and(Value::is_array) {
        return Err(ParseError::MissingField("spaces"));
    }

    let document: MetricsDocument = serde_json::from_value(value)?;

    if let (Some(start), Some(end)) = (document.start_line, document.end_line) {
        check_line_order(start, end, &document.name)?;
    }
    for space in &document.spaces {
        validate_space(space)?;
    }

    Ok(document)
}

fn validate_space(space: &Space) -> Result<(), ParseError> {
    check_line_order(
        space.start_line,
        space.end_line,
        space.name.as_deref().unwrap_or("<anonymous>"),
    )?;
    space.spaces.iter().try_for_each(validate_space)
}

fn check_line_order(start: usize, end: usize, name: &str) -> Result<(), ParseError> {
    if start > end {
        return Err(ParseError::InvalidFormat(format!(
            "space {} ends at line {} before it starts at line {}",
            name, end, start
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_name_is_reported() {
        let err = parse_document(json!({ "spaces": [] })).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("name")));
    }

    #[test]
    fn test_missing_spaces_is_reported() {
        let err = parse_document(json!({ "name": "a.c" })).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("spaces")));
    }

    #[test]
    fn test_space_without_lines_is_rejected() {
        let err = parse_document(json!({ "name": "a.c", "spaces": [{ "cognitive": 1 }] }))
            .unwrap_err();
        assert!(matches!(err, ParseError::JsonError(_)));
    }

    #[test]
    fn test_inverted_lines_are_rejected() {
        let value = json!({
            "name": "a.c",
            "spaces": [{ "start_line": 2, "end_line": 4,
                         "spaces": [{ "start_line": 9, "end_line": 3 }] }]
        });
        assert!(matches!(
            parse_document(value),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_metric_keys_are_collected() {
        let document = parse_document(json!({
            "name": "a.c",
            "start_line": 1,
            "end_line": 5,
            "kind": "unit",
            "spaces": [{ "name": "f", "start_line": 2, "end_line": 4, "cognitive": 1 }],
            "metrics": { "nom": { "functions": 1 } }
        }))
        .unwrap();

        assert_eq!(document.start_line, Some(1));
        assert!(document.metrics.contains_key("metrics"));
        assert!(!document.metrics.contains_key("kind"));
        assert_eq!(document.spaces[0].metrics.get("cognitive"), Some(&json!(1)));
        assert!(!document.spaces[0].metrics.contains_key("name"));
    }
}
