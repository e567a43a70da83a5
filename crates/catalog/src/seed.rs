//! Catalog seed loading (JSON array of items).

use std::path::Path;

use thiserror::Error;

use crate::item::Item;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read catalog seed {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog seed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a JSON array of items.
pub fn items_from_json(json: &str) -> Result<Vec<Item>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a JSON catalog seed file.
pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<Item>, SeedError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    items_from_json(&raw)
}
