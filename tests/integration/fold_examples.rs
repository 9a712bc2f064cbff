//! Worked fold examples: exact blobs, labels and resolution order

use super::test_utils::{fold_json, fold_native};
use evidence_dag::content_id::{ContentId, HashAlgorithm};
use evidence_dag::dag::DagReader;
use evidence_dag::error::FoldError;
use evidence_dag::store::{ArtifactStore, MemoryArtifactStore};
use evidence_dag::tree::GraphBuilder;
use evidence_dag::value::Value;
use serde_json::json;

/// Two-level object folds child first, then root referencing the child id
#[test]
fn test_nested_object_example() {
    let (store, build) = fold_json(json!({"a": {"b": 1, "c": 2}, "d": 3}));

    assert_eq!(build.leaf_count, 3);
    assert_eq!(build.steps.len(), 2);

    let first = &build.steps[0];
    assert_eq!(first.label, "a");
    assert_eq!(first.blob, r#"{"b":"1","c":"2"}"#);
    assert_eq!(
        first.id,
        ContentId::compute(HashAlgorithm::Blake3, first.blob.as_bytes())
    );

    let root = &build.steps[1];
    assert_eq!(root.label, "root");
    assert_eq!(root.blob, format!(r#"{{"a":"{}","d":"3"}}"#, first.id));
    assert_eq!(root.id, build.root);

    assert_eq!(store.len(), 2);

    // A second run yields the same identifiers
    let (_, again) = fold_json(json!({"a": {"b": 1, "c": 2}, "d": 3}));
    assert_eq!(again, build);
}

/// All-index groups become array blobs
#[test]
fn test_array_example() {
    let (_, native) = fold_native(json!({"list": [10, 20]}));
    assert_eq!(native.steps[0].label, "list");
    assert_eq!(native.steps[0].blob, "[10,20]");

    let (_, text) = fold_json(json!({"list": [10, 20]}));
    assert_eq!(text.steps[0].blob, r#"["10","20"]"#);
    assert_ne!(native.root, text.root);
}

#[test]
fn test_array_order_is_numeric() {
    let items: Vec<u64> = (0..12).collect();
    let (_, build) = fold_native(json!({ "n": items }));
    assert_eq!(build.steps[0].blob, "[0,1,2,3,4,5,6,7,8,9,10,11]");
}

#[test]
fn test_array_of_objects_resolution_order() {
    let (_, build) = fold_json(json!({"items": [{"n": 1}, {"n": 2}], "ok": true}));
    let labels: Vec<&str> = build.steps.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["items.000", "items.001", "items", "root"]);

    let items = &build.steps[2];
    assert_eq!(
        items.blob,
        format!(r#"["{}","{}"]"#, build.steps[0].id, build.steps[1].id)
    );
}

#[test]
fn test_scalar_kinds_under_text_encoding() {
    let (_, build) = fold_json(json!({"s": "x", "n": 1.5, "b": false, "z": null}));
    assert_eq!(
        build.steps[0].blob,
        r#"{"b":"false","n":"1.5","s":"x","z":"null"}"#
    );

    let (_, native) = fold_native(json!({"s": "x", "n": 1.5, "b": false, "z": null}));
    assert_eq!(native.steps[0].blob, r#"{"b":false,"n":1.5,"s":"x","z":null}"#);
}

#[test]
fn test_names_and_values_are_escaped() {
    let (_, build) = fold_json(json!({"quote\"key": "line\nbreak"}));
    assert_eq!(build.steps[0].blob, r#"{"quote\"key":"line\nbreak"}"#);
    let parsed: serde_json::Value = serde_json::from_str(&build.steps[0].blob).unwrap();
    assert_eq!(parsed["quote\"key"], "line\nbreak");
}

/// Member names containing the separator do not collide with nested paths
#[test]
fn test_dotted_member_names_stay_distinct() {
    let (store, build) = fold_json(json!({"a.b": {"c": 1}, "a": {"b": {"c": 2}}}));
    let labels: Vec<&str> = build.steps.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["a.b", "a", "a.b", "root"]);

    let expanded = DagReader::new(&store).expand(&build.root).unwrap();
    assert_eq!(
        expanded,
        json!({"a": {"b": {"c": "2"}}, "a.b": {"c": "1"}})
    );
}

/// Equal-depth groups resolve in segment order, so `a` sorts before `a-b`
/// even though `-` sorts below `.` byte-wise
#[test]
fn test_tie_order_compares_segments() {
    let (_, build) = fold_json(json!({"a-b": {"c": {"k": 2}}, "a": {"z": {"k": 1}}}));
    let labels: Vec<&str> = build.steps.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["a.z", "a-b.c", "a", "a-b", "root"]);
}

/// Objects whose names are all indices are read back as arrays
#[test]
fn test_numeric_object_names_fold_as_array() {
    let (_, build) = fold_json(json!({"m": {"1": "y", "0": "x"}}));
    assert_eq!(build.steps[0].blob, r#"["x","y"]"#);
}

#[test]
fn test_empty_object_root() {
    let (store, build) = fold_json(json!({}));
    assert_eq!(build.leaf_count, 0);
    assert_eq!(build.steps.len(), 1);
    assert_eq!(build.steps[0].blob, "{}");
    assert_eq!(build.root, ContentId::compute(HashAlgorithm::Blake3, b"{}"));
    assert!(store.exists(&build.root).unwrap());
}

#[test]
fn test_empty_array_root() {
    let (_, build) = fold_json(json!([]));
    assert_eq!(build.steps[0].blob, "[]");
    assert_eq!(build.root, ContentId::compute(HashAlgorithm::Blake3, b"[]"));
}

#[test]
fn test_nested_empty_containers_are_dropped() {
    let (_, with_empty) = fold_json(json!({"a": {}, "l": [], "b": 1}));
    let (_, without) = fold_json(json!({"b": 1}));
    assert_eq!(with_empty.root, without.root);

    let (_, only_empty) = fold_json(json!({"a": {"b": []}}));
    assert_eq!(only_empty.steps.len(), 1);
    assert_eq!(only_empty.steps[0].blob, "{}");
}

#[test]
fn test_scalar_root_is_malformed() {
    let store = MemoryArtifactStore::new();
    let result = GraphBuilder::new(&store).build(&Value::from(42));
    assert!(matches!(result, Err(FoldError::MalformedInput(_))));
    assert!(store.is_empty());
}

#[test]
fn test_root_array_of_scalars() {
    let (_, build) = fold_json(json!(["x", "y"]));
    assert_eq!(build.steps.len(), 1);
    assert_eq!(build.steps[0].label, "root");
    assert_eq!(build.steps[0].blob, r#"["x","y"]"#);
}
