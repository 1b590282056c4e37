//! Favorite store error types.

/// Errors that can occur when mutating or querying the favorite store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FavoriteStoreError {
    /// The underlying storage failed
    #[error("favorite store unavailable: {message}")]
    Unavailable { message: String },
}
