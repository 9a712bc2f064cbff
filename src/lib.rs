//! Evidence DAG: content-addressed folding of build evidence
//!
//! Turns a nested evidence tree (JSON or TOML) into a Merkle-DAG of small
//! canonical JSON blobs. Every sub-tree is addressed by the hash of its blob,
//! so any part of the evidence can be fetched and verified on its own.

pub mod cli;
pub mod config;
pub mod content_id;
pub mod dag;
pub mod error;
pub mod evidence;
pub mod logging;
pub mod store;
pub mod tree;
pub mod value;
