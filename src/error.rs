//! Error types for the cache client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache client.
///
/// A missing key is not an error: reads return `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Connection or protocol failure talking to the store
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Stored bytes could not be interpreted by the requested decoder
    #[error("Cannot decode value at '{key}': {reason}")]
    Decode { key: String, reason: String },

    /// The wrapped fetch function failed
    #[error("Fetch failed for '{argument}': {reason}")]
    FetchFailed { argument: String, reason: String },

    /// Configuration value could not be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CacheError {
    /// Builds a `FetchFailed` error for the given argument.
    pub fn fetch_failed(argument: impl Into<String>, reason: impl ToString) -> Self {
        CacheError::FetchFailed {
            argument: argument.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::StoreUnavailable(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache client.
pub type Result<T> = std::result::Result<T, CacheError>;
