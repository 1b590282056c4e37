//! Favorite route store.
//!
//! A durable set of favorite routes keyed by composite id, with a live
//! listing that notifies consumers on every insert and delete. The engine
//! depends only on the [`FavoriteStore`] trait; [`MemoryFavoriteStore`] is
//! the in-process reference implementation.

mod error;
mod memory;

pub use error::FavoriteStoreError;
pub use memory::MemoryFavoriteStore;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::FavoriteRoute;

/// Durable favorite-route set.
///
/// The store is the single source of truth for favorite membership;
/// consumers must re-derive membership through it rather than caching
/// flags across mutations.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Insert a favorite route.
    async fn insert(&self, favorite: FavoriteRoute) -> Result<(), FavoriteStoreError>;

    /// Delete a favorite route by its composite id.
    async fn delete(&self, favorite: &FavoriteRoute) -> Result<(), FavoriteStoreError>;

    /// Whether a route with this composite id is currently a favorite.
    async fn exists(&self, composite_id: i64) -> Result<bool, FavoriteStoreError>;

    /// Live listing of all favorites.
    ///
    /// The receiver holds the current listing and is notified on every
    /// insert and delete, not just on explicit poll.
    fn list_all(&self) -> watch::Receiver<Vec<FavoriteRoute>>;
}
