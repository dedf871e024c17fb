//! Error types for the todo API client.
//!
//! `NotFound` gets a dedicated variant because the server answers 404 for
//! unknown and soft-deleted items, and callers usually branch on that. Any
//! other unexpected status lands in `HttpError` with the server's message.

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404: the item does not exist or was deleted.
    #[error("resource not found")]
    NotFound,

    /// The server returned an unexpected status other than 404.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
