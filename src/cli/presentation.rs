//! CLI presentation: text, json and table formatters per command family.

mod build;
mod dag;

pub use build::format_build_result;
pub use dag::{format_list_result, format_resolved, format_verify_report};
