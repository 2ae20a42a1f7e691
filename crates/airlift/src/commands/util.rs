//! Shared helpers for command handlers.

use std::path::Path;

use airlift_core::ConfigDocument;

use crate::error::CliError;

/// Read and decode a YAML configuration document.
pub fn read_document(path: &Path) -> Result<ConfigDocument, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::DocumentRead {
        path: path.display().to_string(),
        source,
    })?;

    serde_yaml::from_str(&raw).map_err(|source| CliError::DocumentParse {
        path: path.display().to_string(),
        source,
    })
}
