//! Evidence Merkle-DAG
//!
//! Flattens a nested evidence tree into a path table, then folds it bottom-up:
//! each group of siblings becomes one canonical blob, addressed by its hash,
//! and the identifier takes the group's place one level up.

pub mod builder;
pub mod canonical;
pub mod flatten;
pub mod group;
pub mod hasher;
pub mod path;

pub use builder::{DagBuild, FoldConfig, FoldStep, GraphBuilder};
pub use canonical::{Blob, Canonicalizer, ScalarEncoding};
pub use flatten::{FlatTable, Leaf, PathFlattener};
pub use group::{take_deepest_group, BlobLayout, Group};
pub use hasher::ContentAddresser;
pub use path::KeyPath;
