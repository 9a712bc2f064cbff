//! Integration tests for fold determinism and change propagation

use super::test_utils::fold_json;
use evidence_dag::error::FoldError;
use evidence_dag::evidence::{parse_evidence, EvidenceFormat};
use evidence_dag::store::MemoryArtifactStore;
use evidence_dag::tree::{DagBuild, GraphBuilder};
use evidence_dag::value::Value;
use serde_json::json;
use std::collections::BTreeMap;

fn ids_by_label(build: &DagBuild) -> BTreeMap<String, String> {
    build
        .steps
        .iter()
        .map(|s| (s.label.clone(), s.id.to_string()))
        .collect()
}

/// Member insertion order does not affect identifiers or stored blobs
#[test]
fn test_insertion_order_independent() {
    let forward = Value::object([
        ("build", Value::object([("id", Value::from(7)), ("ref", Value::from("main"))])),
        ("ok", Value::from(true)),
    ]);
    let reversed = Value::object([
        ("ok", Value::from(true)),
        ("build", Value::object([("ref", Value::from("main")), ("id", Value::from(7))])),
    ]);

    let store_a = MemoryArtifactStore::new();
    let store_b = MemoryArtifactStore::new();
    let a = GraphBuilder::new(&store_a).build(&forward).unwrap();
    let b = GraphBuilder::new(&store_b).build(&reversed).unwrap();

    assert_eq!(a.root, b.root);
    assert_eq!(store_a.records(), store_b.records());
}

/// Changing one leaf changes every group on its path and no others
#[test]
fn test_leaf_change_propagates_along_path_only() {
    let before = json!({"a": {"x": {"p": 1}, "y": 2}, "b": {"q": 3}});
    let after = json!({"a": {"x": {"p": 9}, "y": 2}, "b": {"q": 3}});

    let (_, one) = fold_json(before);
    let (_, two) = fold_json(after);
    let one = ids_by_label(&one);
    let two = ids_by_label(&two);

    for label in ["a.x", "a", "root"] {
        assert_ne!(one[label], two[label], "group '{}' should change", label);
    }
    assert_eq!(one["b"], two["b"], "sibling sub-tree must keep its id");
}

/// Sub-trees with identical content share one blob
#[test]
fn test_identical_subtrees_share_blob() {
    let (store, build) = fold_json(json!({"left": {"v": 1}, "right": {"v": 1}}));
    let ids = ids_by_label(&build);
    assert_eq!(ids["left"], ids["right"]);
    // left, right (deduplicated) and root
    assert_eq!(store.len(), 2);
}

#[test]
fn test_json_and_toml_agree() {
    let json = parse_evidence(
        r#"{"build": {"id": 42, "tags": ["x", "y"]}, "name": "svc"}"#,
        EvidenceFormat::Json,
    )
    .unwrap();
    let toml = parse_evidence(
        "name = \"svc\"\n[build]\nid = 42\ntags = [\"x\", \"y\"]\n",
        EvidenceFormat::Toml,
    )
    .unwrap();

    let store = MemoryArtifactStore::new();
    let a = GraphBuilder::new(&store).build(&json).unwrap();
    let b = GraphBuilder::new(&store).build(&toml).unwrap();
    assert_eq!(a.root, b.root);
}

/// Canonically equivalent member names fold to the same identifier
#[test]
fn test_unicode_names_are_normalized() {
    let composed = Value::object([("caf\u{e9}", Value::from(1))]);
    let decomposed = Value::object([("cafe\u{301}", Value::from(1))]);

    let store = MemoryArtifactStore::new();
    let a = GraphBuilder::new(&store).build(&composed).unwrap();
    let b = GraphBuilder::new(&store).build(&decomposed).unwrap();
    assert_eq!(a.root, b.root);
}

#[test]
fn test_duplicate_names_after_normalization_rejected() {
    let value = Value::object([("caf\u{e9}", Value::from(1)), ("cafe\u{301}", Value::from(2))]);
    let store = MemoryArtifactStore::new();
    assert!(matches!(
        GraphBuilder::new(&store).build(&value),
        Err(FoldError::MalformedInput(_))
    ));
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let mut value = json!({"leaf": 1});
    for _ in 0..2_000 {
        value = json!({ "n": value });
    }
    let (_, build) = fold_json(value);
    assert_eq!(build.leaf_count, 1);
    assert_eq!(build.steps.len(), 2_001);
}
