//! Shared test utilities for integration tests

use evidence_dag::store::MemoryArtifactStore;
use evidence_dag::tree::{DagBuild, FoldConfig, GraphBuilder, ScalarEncoding};
use evidence_dag::value::Value;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: &[&str] = &[
    "XDG_CONFIG_HOME",
    "EVIDAG_ENV",
    "EVIDAG_STORE__PATH",
    "EVIDAG_STORE__EXTENSION",
    "EVIDAG_FOLD__SCALAR_ENCODING",
    "EVIDAG_FOLD__INDEX_WIDTH",
];

/// Run `f` with a private XDG config home and no EVIDAG_* overrides.
/// The previous environment is restored afterwards.
pub fn with_isolated_env<F, R>(f: F) -> R
where
    F: FnOnce(&TempDir) -> R,
{
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(&str, Option<String>)> = ISOLATED_VARS
        .iter()
        .map(|key| (*key, std::env::var(key).ok()))
        .collect();

    let temp = TempDir::new().unwrap();
    for key in ISOLATED_VARS {
        std::env::remove_var(key);
    }
    std::env::set_var("XDG_CONFIG_HOME", temp.path().join("xdg"));

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(&temp)));

    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }

    match result {
        Ok(r) => r,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Fold `json` into a fresh in-memory store
pub fn fold_json(json: serde_json::Value) -> (MemoryArtifactStore, DagBuild) {
    fold_with(json, FoldConfig::default())
}

pub fn fold_native(json: serde_json::Value) -> (MemoryArtifactStore, DagBuild) {
    fold_with(
        json,
        FoldConfig {
            scalar_encoding: ScalarEncoding::Native,
            ..FoldConfig::default()
        },
    )
}

pub fn fold_with(json: serde_json::Value, config: FoldConfig) -> (MemoryArtifactStore, DagBuild) {
    let store = MemoryArtifactStore::new();
    let build = GraphBuilder::new(&store)
        .with_config(config)
        .build(&Value::from(json))
        .unwrap();
    (store, build)
}
