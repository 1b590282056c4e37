//! In-memory favorite store.

use async_trait::async_trait;
use tokio::sync::{RwLock, watch};

use crate::domain::FavoriteRoute;

use super::FavoriteStore;
use super::error::FavoriteStoreError;

/// In-memory favorite store with a live listing.
///
/// Mutations are serialized through a write lock; the listing channel is
/// republished inside the critical section so observers always see
/// mutations in the order they were applied.
pub struct MemoryFavoriteStore {
    routes: RwLock<Vec<FavoriteRoute>>,
    listing: watch::Sender<Vec<FavoriteRoute>>,
}

impl MemoryFavoriteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (listing, _) = watch::channel(Vec::new());
        Self {
            routes: RwLock::new(Vec::new()),
            listing,
        }
    }

    /// Create a store pre-populated with favorites.
    pub fn with_favorites(favorites: Vec<FavoriteRoute>) -> Self {
        let (listing, _) = watch::channel(favorites.clone());
        Self {
            routes: RwLock::new(favorites),
            listing,
        }
    }
}

impl Default for MemoryFavoriteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FavoriteStore for MemoryFavoriteStore {
    async fn insert(&self, favorite: FavoriteRoute) -> Result<(), FavoriteStoreError> {
        let mut routes = self.routes.write().await;
        // Composite id is the primary key: re-inserting replaces the record.
        routes.retain(|r| r.composite_id != favorite.composite_id);
        routes.push(favorite);
        self.listing.send_replace(routes.clone());
        Ok(())
    }

    async fn delete(&self, favorite: &FavoriteRoute) -> Result<(), FavoriteStoreError> {
        let mut routes = self.routes.write().await;
        routes.retain(|r| r.composite_id != favorite.composite_id);
        self.listing.send_replace(routes.clone());
        Ok(())
    }

    async fn exists(&self, composite_id: i64) -> Result<bool, FavoriteStoreError> {
        let routes = self.routes.read().await;
        Ok(routes.iter().any(|r| r.composite_id == composite_id))
    }

    fn list_all(&self) -> watch::Receiver<Vec<FavoriteRoute>> {
        self.listing.subscribe()
    }
}
