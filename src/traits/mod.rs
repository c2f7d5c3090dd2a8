//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - one GET attempt against the remote API
//! - [`ResponseCache`] - bounded store for selected API results
//! - [`WatchSource`] - non-caching re-fetches driven by the change poller

pub mod cache;
pub mod http;
pub mod source;

pub use cache::ResponseCache;
pub use http::{Headers, HttpClient, HttpError, Response};
pub use source::WatchSource;
