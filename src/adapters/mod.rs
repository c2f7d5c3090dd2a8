//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`MemoryCache`] - bounded in-memory response cache
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::MockWatchSource`] - Scripted poll cycle outcomes

pub mod memory_cache;
pub mod mock;
pub mod reqwest_http;

pub use memory_cache::MemoryCache;
pub use mock::{MockHttpClient, MockWatchSource};
pub use reqwest_http::ReqwestHttpClient;
