//! Last-search-query persistence.
//!
//! A durable single string slot holding the user's last-typed search
//! text. Persistence is best-effort: the engine swallows failures and
//! falls back to the empty string, so implementations may fail without
//! affecting the caller's logical operation.

mod error;
mod file;
mod memory;

pub use error::QueryStoreError;
pub use file::FileQueryStore;
pub use memory::MemoryQueryStore;

use async_trait::async_trait;

/// Durable slot for the last search text.
#[async_trait]
pub trait QueryStore: Send + Sync {
    /// Load the persisted query text. An empty slot loads as `""`.
    async fn load(&self) -> Result<String, QueryStoreError>;

    /// Persist the query text, replacing the previous value.
    async fn save(&self, query: &str) -> Result<(), QueryStoreError>;
}
