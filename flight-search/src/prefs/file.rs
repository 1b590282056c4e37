//! File-backed query slot.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::QueryStore;
use super::error::QueryStoreError;

/// On-disk representation of the slot.
#[derive(Debug, Serialize, Deserialize)]
struct SavedQuery {
    last_search_query: String,
}

/// Query slot persisted as a small JSON file.
///
/// A missing file loads as the empty string; saving creates parent
/// directories as needed.
#[derive(Debug, Clone)]
pub struct FileQueryStore {
    path: PathBuf,
}

impl FileQueryStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QueryStore for FileQueryStore {
    async fn load(&self) -> Result<String, QueryStoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(String::new()),
            Err(e) => {
                return Err(QueryStoreError::Io {
                    message: e.to_string(),
                });
            }
        };

        let saved: SavedQuery =
            serde_json::from_str(&contents).map_err(|e| QueryStoreError::Format {
                message: e.to_string(),
            })?;

        Ok(saved.last_search_query)
    }

    async fn save(&self, query: &str) -> Result<(), QueryStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| QueryStoreError::Io {
                message: format!("failed to create slot directory: {}", e),
            })?;
        }

        let saved = SavedQuery {
            last_search_query: query.to_string(),
        };
        let json = serde_json::to_string_pretty(&saved).map_err(|e| QueryStoreError::Format {
            message: e.to_string(),
        })?;

        std::fs::write(&self.path, json).map_err(|e| QueryStoreError::Io {
            message: e.to_string(),
        })
    }
}
