//! In-memory query slot.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::QueryStore;
use super::error::QueryStoreError;

/// Ephemeral query slot, useful in tests and for sessions without
/// persistence.
pub struct MemoryQueryStore {
    slot: RwLock<String>,
}

impl MemoryQueryStore {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(String::new()),
        }
    }

    /// Create a slot holding the given text.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(query.into()),
        }
    }
}

impl Default for MemoryQueryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryStore for MemoryQueryStore {
    async fn load(&self) -> Result<String, QueryStoreError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, query: &str) -> Result<(), QueryStoreError> {
        *self.slot.write().await = query.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_by_default() {
        let store = MemoryQueryStore::new();
        assert_eq!(store.load().await.unwrap(), "");
    }

    #[tokio::test]
    async fn save_then_load() {
        let store = MemoryQueryStore::new();
        store.save("gatwick").await.unwrap();
        assert_eq!(store.load().await.unwrap(), "gatwick");
    }

    #[tokio::test]
    async fn with_query_seeds_the_slot() {
        let store = MemoryQueryStore::with_query("LHR");
        assert_eq!(store.load().await.unwrap(), "LHR");
    }
}
