//! Airport lookup error types.

/// Errors that can occur when querying an airport lookup source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    /// Failed to read the backing dataset
    #[error("failed to read airport dataset: {message}")]
    Io { message: String },

    /// The backing dataset could not be parsed
    #[error("malformed airport dataset: {message}")]
    Parse { message: String },

    /// The source itself failed (I/O error, upstream timeout)
    #[error("airport source unavailable: {message}")]
    Unavailable { message: String },
}
