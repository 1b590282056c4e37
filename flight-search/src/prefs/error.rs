//! Query persistence error types.

/// Errors that can occur when loading or saving the query slot.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryStoreError {
    /// Reading or writing the slot failed
    #[error("query slot I/O error: {message}")]
    Io { message: String },

    /// The persisted slot could not be parsed
    #[error("malformed query slot: {message}")]
    Format { message: String },
}
