//! Evidence input loading
//!
//! Reads an evidence bundle from a JSON or TOML file. Gathering the bundle
//! itself happens upstream; this only turns a file into a [`Value`].

use crate::error::ApiError;
use crate::value::Value;
use std::path::Path;

/// Input format of an evidence file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceFormat {
    Json,
    Toml,
}

impl EvidenceFormat {
    /// Guess from the file extension; anything but `.toml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => EvidenceFormat::Toml,
            _ => EvidenceFormat::Json,
        }
    }
}

/// Parse evidence text
pub fn parse_evidence(text: &str, format: EvidenceFormat) -> Result<Value, ApiError> {
    match format {
        EvidenceFormat::Json => {
            let json: serde_json::Value = serde_json::from_str(text)
                .map_err(|e| ApiError::InputError(format!("Invalid JSON evidence: {}", e)))?;
            Ok(Value::from(json))
        }
        EvidenceFormat::Toml => {
            let table: toml::Value = toml::from_str(text)
                .map_err(|e| ApiError::InputError(format!("Invalid TOML evidence: {}", e)))?;
            Ok(Value::try_from(table)?)
        }
    }
}

/// Load an evidence file, choosing the parser from its extension
pub fn load_evidence_file(path: &Path) -> Result<Value, ApiError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ApiError::InputError(format!("Failed to read evidence file {:?}: {}", path, e))
    })?;
    parse_evidence(&text, EvidenceFormat::from_path(path))
}
