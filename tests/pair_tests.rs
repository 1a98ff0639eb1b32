//! Tests for single-pair processing: diff, span resolution and extraction together.

mod common;

use common::*;
use metrics_minimal_tests::batch::{
    process_pair, process_pair_with, FailureKind, Outcome, PairContext, SkipReason,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;

#[test]
fn test_worked_example_emits_one_block() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "a.c", SOURCE_LINES);
    let old = write_document(&dir.path().join("old"), "a.c.json", &single_space_document(&source, 1));
    let new = write_document(&dir.path().join("new"), "a.c.json", &single_space_document(&source, 2));
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let outcome = process_pair(&old, &new, &out);

    assert_eq!(
        outcome,
        Outcome::Extracted {
            spans: 1,
            artifact: out.join("a.c"),
        }
    );
    let artifact = fs::read_to_string(out.join("a.c")).unwrap();
    assert!(artifact.contains("L2\nL3\n"));
    assert_eq!(artifact, "Minimal test:\nL2\nL3\nL4\n\n");
    assert_eq!(artifact.matches("Minimal test:").count(), 1);
}

#[test]
fn test_identical_documents_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "a.c", SOURCE_LINES);
    let document = single_space_document(&source, 1);
    let old = write_document(&dir.path().join("old"), "a.c.json", &document);
    let new = write_document(&dir.path().join("new"), "a.c.json", &document);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let outcome = process_pair(&old, &new, &out);

    assert_eq!(outcome, Outcome::skipped(SkipReason::IdenticalDocuments));
    assert!(!out.join("a.c").exists());
}

#[test]
fn test_reordered_keys_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let old = write_file(
        dir.path(),
        "old/a.c.json",
        r#"{"name":"a.c","spaces":[{"start_line":1,"end_line":3,"metrics":{"a":1,"b":[1,2]}}]}"#,
    );
    let new = write_file(
        dir.path(),
        "new/a.c.json",
        r#"{"spaces":[{"metrics":{"b":[2,1],"a":1.0},"end_line":3,"start_line":1}],"name":"a.c"}"#,
    );

    let outcome = process_pair(&old, &new, dir.path());

    assert_eq!(outcome, Outcome::skipped(SkipReason::IdenticalDocuments));
}

#[test]
fn test_undecodable_source_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "latin1.c", b"L1\nL\xe92\nL3\nL4\n".as_slice());
    let old = write_document(&dir.path().join("old"), "latin1.c.json", &single_space_document(&source, 1));
    let new = write_document(&dir.path().join("new"), "latin1.c.json", &single_space_document(&source, 3));
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let outcome = process_pair(&old, &new, &out);

    assert_eq!(outcome, Outcome::skipped(SkipReason::UndecodableSource));
    assert!(!out.join("latin1.c").exists());
}

#[test]
fn test_malformed_document_fails_with_parse() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "a.c", SOURCE_LINES);
    let old = write_document(&dir.path().join("old"), "a.c.json", &single_space_document(&source, 1));
    let new = write_file(dir.path(), "new/a.c.json", "{ not json");

    match process_pair(&old, &new, dir.path()) {
        Outcome::Failed(failure) => {
            assert_eq!(failure.kind, FailureKind::Parse);
            assert!(failure.message.contains("a.c.json"));
        }
        other => panic!("expected a parse failure, got {:?}", other),
    }
}

#[test]
fn test_document_without_spaces_fails_with_parse() {
    let dir = tempfile::tempdir().unwrap();
    let old = write_document(dir.path(), "old/a.c.json", &json!({ "name": "a.c" }));
    let new = write_document(dir.path(), "new/a.c.json", &json!({ "name": "a.c", "spaces": [] }));

    let outcome = process_pair(&old, &new, dir.path());

    assert!(matches!(
        outcome,
        Outcome::Failed(ref failure) if failure.kind == FailureKind::Parse
    ));
}

#[test]
fn test_missing_source_fails_as_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("missing.c");
    let old = write_document(dir.path(), "old/missing.c.json", &single_space_document(&source, 1));
    let new = write_document(dir.path(), "new/missing.c.json", &single_space_document(&source, 2));

    let outcome = process_pair(&old, &new, dir.path());

    assert!(matches!(
        outcome,
        Outcome::Failed(ref failure) if failure.kind == FailureKind::SourceUnreadable
    ));
}

#[test]
fn test_overlapping_changes_share_one_span() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "a.c", SOURCE_LINES);
    let old = write_document(dir.path(), "old/a.c.json", &analyzer_document(&source, 1.0, 1.0));
    let new = write_document(dir.path(), "new/a.c.json", &analyzer_document(&source, 2.0, 1.0));
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    // sum and average both change inside the same Space
    let outcome = process_pair(&old, &new, &out);

    assert_eq!(
        outcome,
        Outcome::Extracted {
            spans: 1,
            artifact: out.join("a.c"),
        }
    );
    assert_eq!(
        fs::read_to_string(out.join("a.c")).unwrap(),
        "Minimal test:\nL1\nL2\n\n"
    );
}

#[test]
fn test_new_nested_space_extracts_parent() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "a.c", SOURCE_LINES);
    let old_doc = json!({
        "name": source.to_str().unwrap(),
        "spaces": [{ "start_line": 2, "end_line": 5, "spaces": [], "nom": 1 }]
    });
    let new_doc = json!({
        "name": source.to_str().unwrap(),
        "spaces": [{ "start_line": 2, "end_line": 5, "nom": 1,
                     "spaces": [{ "start_line": 3, "end_line": 4, "nom": 1 }] }]
    });
    let old = write_document(dir.path(), "old/a.c.json", &old_doc);
    let new = write_document(dir.path(), "new/a.c.json", &new_doc);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let outcome = process_pair(&old, &new, &out);

    assert!(matches!(outcome, Outcome::Extracted { spans: 1, .. }));
    assert_eq!(
        fs::read_to_string(out.join("a.c")).unwrap(),
        "Minimal test:\nL2\nL3\nL4\nL5\n\n"
    );
}

#[test]
fn test_only_unresolvable_changes_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "a.c", SOURCE_LINES);
    // A root metric changes, but the root has no line range to point at
    let old_doc = json!({ "name": source.to_str().unwrap(), "spaces": [], "blank": 1 });
    let new_doc = json!({ "name": source.to_str().unwrap(), "spaces": [], "blank": 2 });
    let old = write_document(dir.path(), "old/a.c.json", &old_doc);
    let new = write_document(dir.path(), "new/a.c.json", &new_doc);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let outcome = process_pair(&old, &new, &out);

    assert_eq!(outcome, Outcome::skipped(SkipReason::NoResolvableSpans));
    assert!(!out.join("a.c").exists());
}

#[test]
fn test_relative_source_names_use_source_root() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "repo/lib/a.c", SOURCE_LINES);
    let old_doc = json!({ "name": "lib/a.c", "spaces": [{ "start_line": 5, "end_line": 5, "nargs": 0 }] });
    let new_doc = json!({ "name": "lib/a.c", "spaces": [{ "start_line": 5, "end_line": 5, "nargs": 1 }] });
    let old = write_document(dir.path(), "old/a.c.json", &old_doc);
    let new = write_document(dir.path(), "new/a.c.json", &new_doc);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let context = PairContext::new(&out).with_source_root(dir.path().join("repo"));
    let outcome = process_pair_with(&old, &new, &context);

    assert!(matches!(outcome, Outcome::Extracted { spans: 1, .. }));
    assert_eq!(
        fs::read_to_string(out.join("a.c")).unwrap(),
        "Minimal test:\nL5\n\n"
    );
}
