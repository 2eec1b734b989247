//! Error handling for the caredesk services.

use std::io;

/// Specialized error type for caredesk operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Malformed or out-of-range input, rejected before reaching any component
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested patient id does not exist in the store
    #[error("Patient not found")]
    NotFound,

    /// Patient id already present when creating a record
    #[error("Patient already exists")]
    Conflict,

    /// Classifier artifact problem: bad artifact file or a feature value the
    /// artifact's tables do not cover
    #[error("Model error: {0}")]
    Model(String),

    /// Corrupt or unwritable backing store file
    #[error("Store error: {0}")]
    Store(String),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ServiceError {
    /// True for errors caused by the server rather than the request
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Model(_) | Self::Store(_) | Self::Io(_))
    }
}

/// Result type for caredesk operations
pub type Result<T> = std::result::Result<T, ServiceError>;
