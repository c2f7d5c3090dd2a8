//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockWatchSource`] - Poll source with scripted results

pub mod http;
pub mod source;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use source::MockWatchSource;
