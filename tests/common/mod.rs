//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const SOURCE_LINES: &str = "L1\nL2\nL3\nL4\nL5\n";

/// Write `contents` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Write a metrics document as JSON
pub fn write_document(dir: &Path, name: &str, document: &Value) -> PathBuf {
    write_file(dir, name, serde_json::to_vec_pretty(document).unwrap())
}

/// Document with one function Space at lines 2..=4
pub fn single_space_document(source: &Path, cognitive: i64) -> Value {
    json!({
        "name": source.to_str().unwrap(),
        "spaces": [{ "start_line": 2, "end_line": 4, "cognitive": cognitive }]
    })
}

/// Analyzer-shaped document with a unit root and two functions
pub fn analyzer_document(source: &Path, first_sum: f64, second_sum: f64) -> Value {
    json!({
        "name": source.to_str().unwrap(),
        "start_line": 1,
        "end_line": 5,
        "kind": "unit",
        "spaces": [
            {
                "name": "first", "kind": "function", "start_line": 1, "end_line": 2,
                "spaces": [],
                "metrics": { "cyclomatic": { "sum": first_sum, "average": first_sum } }
            },
            {
                "name": "second", "kind": "function", "start_line": 4, "end_line": 5,
                "spaces": [],
                "metrics": { "cyclomatic": { "sum": second_sum, "average": second_sum } }
            }
        ],
        "metrics": { "nom": { "functions": 2.0 } }
    })
}

/// Lay out `count` sources with old/new documents; every odd pair differs
pub fn populate_batch(root: &Path, count: usize) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut old = Vec::new();
    let mut new = Vec::new();
    for i in 0..count {
        let source = write_file(root, &format!("src/file{:03}.c", i), SOURCE_LINES);
        let name = format!("file{:03}.c.json", i);
        let changed = if i % 2 == 1 { 2 } else { 1 };
        old.push(write_document(
            &root.join("old"),
            &name,
            &single_space_document(&source, 1),
        ));
        new.push(write_document(
            &root.join("new"),
            &name,
            &single_space_document(&source, changed),
        ));
    }
    (old, new)
}

/// All files in `dir` with their contents, sorted by name
pub fn read_dir_contents(dir: &Path) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let path = entry.unwrap().path();
            (
                path.file_name().unwrap().to_string_lossy().into_owned(),
                fs::read_to_string(&path).unwrap(),
            )
        })
        .collect();
    entries.sort();
    entries
}
