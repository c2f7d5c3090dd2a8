//! Errors surfaced by API calls.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::constants::IdType;
use crate::traits::HttpError;

/// Type alias for results of API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single API call, after any retries.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The transport could not complete the GET request.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: HttpError,
    },

    /// The response body was classified as a failure.
    #[error("Call to {key} failed: {message}")]
    Failed {
        key: String,
        message: String,
        retryable: bool,
    },

    /// The API reported that the entity does not exist.
    #[error("Flickr {method} failed for {id_type} {id}: not found")]
    NotFound {
        method: String,
        id_type: IdType,
        id: String,
    },

    /// The response parsed but did not contain the expected field.
    #[error("Flickr {method} response did not contain expected field {field}")]
    SelectorMismatch { method: String, field: String },

    /// The selected value could not be decoded into the requested type.
    #[error("Flickr {method} response could not be decoded: {message}")]
    Decode { method: String, message: String },

    /// Retryable failures exceeded the configured maximum.
    #[error("Flickr {method} failed for {id_type} {id} after {attempts} attempts")]
    RetryExhausted {
        method: String,
        id_type: IdType,
        id: String,
        attempts: u32,
    },

    /// A signed call was requested without an access token.
    #[error("Request signing failed: {0}")]
    Signing(String),
}

impl ApiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Transport { .. } => ErrorCategory::Network,
            ApiError::Failed { retryable: true, .. } => ErrorCategory::Server,
            ApiError::Failed { retryable: false, .. } | ApiError::NotFound { .. } => {
                ErrorCategory::NotFound
            }
            ApiError::SelectorMismatch { .. }
            | ApiError::Decode { .. }
            | ApiError::RetryExhausted { .. } => ErrorCategory::Client,
            ApiError::Signing(_) => ErrorCategory::Configuration,
        }
    }

    /// Whether another attempt at the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Failed { retryable, .. } => *retryable,
            other => other.category().is_retryable(),
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport { .. } => "API_TRANSPORT",
            ApiError::Failed { .. } => "API_FAILED",
            ApiError::NotFound { .. } => "API_NOT_FOUND",
            ApiError::SelectorMismatch { .. } => "API_SHAPE",
            ApiError::Decode { .. } => "API_DECODE",
            ApiError::RetryExhausted { .. } => "API_RETRY_EXHAUSTED",
            ApiError::Signing(_) => "API_SIGNING",
        }
    }
}
