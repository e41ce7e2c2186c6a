//! Error types for user store operations.

use std::borrow::Cow;
use std::io;

/// Error type for all user store operations.
///
/// [`StoreError::NotFound`] and [`StoreError::AlreadyExists`] are business
/// outcomes of a healthy store. Every other variant is a store fault and
/// must not be reported to callers as either of the two.
#[derive(Debug, thiserror::Error)]
#[must_use = "store errors should be handled appropriately"]
pub enum StoreError {
    /// No record exists for the requested username.
    #[error("user not found")]
    NotFound,

    /// A record already exists for the username (conditional write rejected).
    #[error("user already exists")]
    AlreadyExists,

    /// The underlying storage medium failed.
    #[error("storage i/o error: {0}")]
    Io(#[from] io::Error),

    /// A record could not be encoded or decoded.
    #[error("record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unexpected error occurred.
    #[error("unexpected store error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl StoreError {
    /// Creates an unexpected error with the given message.
    pub fn unexpected(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Unexpected(message.into())
    }
}

/// Specialized [`Result`] type for store operations.
pub type StoreResult<T, E = StoreError> = Result<T, E>;

