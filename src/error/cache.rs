//! Response cache errors.

use thiserror::Error;

/// Failure reading from or writing to a [`ResponseCache`](crate::traits::ResponseCache).
///
/// Cache errors are logged and swallowed by the request envelope; they never
/// reach the caller of an API method.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Cached value for {key} could not be decoded: {message}")]
    Decode { key: String, message: String },
}
