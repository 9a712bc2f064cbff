//! Integration tests for the evidence DAG builder

mod config_integration;
mod fold_determinism;
mod fold_examples;
mod test_utils;
