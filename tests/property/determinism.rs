//! Property-based tests for determinism and completeness guarantees

use evidence_dag::content_id::{ContentId, HashAlgorithm};
use evidence_dag::dag::{self, DagReader};
use evidence_dag::store::MemoryArtifactStore;
use evidence_dag::tree::GraphBuilder;
use evidence_dag::value::Value;
use proptest::prelude::*;
use serde_json::Value as JsonValue;

/// Nested JSON objects and arrays with short keys and simple scalars
fn arb_json() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        any::<i64>().prop_map(|n| JsonValue::from(n)),
        "[a-z0-9 ._-]{0,8}".prop_map(JsonValue::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..6).prop_map(JsonValue::Array),
            prop::collection::btree_map("[a-z.]{1,4}", inner, 1..6)
                .prop_map(|m| JsonValue::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_root() -> impl Strategy<Value = JsonValue> {
    prop::collection::btree_map("[a-z]{1,4}", arb_json(), 0..6)
        .prop_map(|m| JsonValue::Object(m.into_iter().collect()))
}

/// Reverse member order at every object level
fn reversed(value: &Value) -> Value {
    match value {
        Value::Object(members) => Value::Object(
            members
                .iter()
                .rev()
                .map(|(k, v)| (k.clone(), reversed(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(reversed).collect()),
        other => other.clone(),
    }
}

/// Text-encoding view of a JSON tree: scalars become their text, empty
/// containers disappear
fn as_text_tree(value: &JsonValue) -> Option<JsonValue> {
    match value {
        JsonValue::Object(map) => {
            let kept: serde_json::Map<String, JsonValue> = map
                .iter()
                .filter_map(|(k, v)| as_text_tree(v).map(|v| (k.clone(), v)))
                .collect();
            (!kept.is_empty()).then_some(JsonValue::Object(kept))
        }
        JsonValue::Array(items) => {
            let kept: Vec<JsonValue> = items.iter().filter_map(as_text_tree).collect();
            (!kept.is_empty()).then_some(JsonValue::Array(kept))
        }
        JsonValue::String(s) => Some(JsonValue::String(s.clone())),
        JsonValue::Null => Some(JsonValue::String("null".to_string())),
        other => Some(JsonValue::String(other.to_string())),
    }
}

/// Test that member order never changes identifiers
#[test]
fn test_order_independence_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&arb_root(), |json| {
            let value = Value::from(json);
            let store_a = MemoryArtifactStore::new();
            let store_b = MemoryArtifactStore::new();

            let a = GraphBuilder::new(&store_a).build(&value).unwrap();
            let b = GraphBuilder::new(&store_b).build(&reversed(&value)).unwrap();

            prop_assert_eq!(a.root, b.root);
            prop_assert_eq!(store_a.records(), store_b.records());
            Ok(())
        })
        .unwrap();
}

/// Test that every stored blob hashes to its identifier and the DAG verifies
#[test]
fn test_completeness_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&arb_root(), |json| {
            let store = MemoryArtifactStore::new();
            let build = GraphBuilder::new(&store)
                .build(&Value::from(json))
                .unwrap();

            for record in store.records() {
                prop_assert_eq!(
                    ContentId::compute(HashAlgorithm::Blake3, record.blob.as_bytes()),
                    record.id
                );
            }

            let report = dag::verify(&store, &build.root).unwrap();
            prop_assert!(report.is_ok());
            // Shared sub-trees are stored and counted once
            prop_assert_eq!(report.blobs, store.len());
            prop_assert!(report.leaves <= build.leaf_count);
            Ok(())
        })
        .unwrap();
}

/// Test that expanding the DAG gives back the evidence under the text encoding
#[test]
fn test_expand_roundtrip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&arb_root(), |json| {
            let store = MemoryArtifactStore::new();
            let build = GraphBuilder::new(&store)
                .build(&Value::from(json.clone()))
                .unwrap();
            let expanded = DagReader::new(&store).expand(&build.root).unwrap();

            let expected =
                as_text_tree(&json).unwrap_or_else(|| JsonValue::Object(Default::default()));
            prop_assert_eq!(expanded, expected);
            Ok(())
        })
        .unwrap();
}
