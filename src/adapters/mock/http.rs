//! Mock HTTP client for testing.
//!
//! Responses are matched by substring of the request URL, which lets tests
//! key on `method=flickr.photosets.getInfo` or on an entity id without
//! rebuilding the full query string.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful response
    Success(Response),
    /// Return an error
    Error(HttpError),
}

impl MockResponse {
    /// A 200 response with the given body.
    pub fn body(body: impl Into<String>) -> Self {
        MockResponse::Success(Response::ok(body))
    }

    /// A 200 response with a JSON body.
    pub fn json(value: serde_json::Value) -> Self {
        MockResponse::Success(Response::ok(value.to_string()))
    }
}

/// Responses queued for one URL pattern. The last response is sticky so a
/// pattern keeps answering once its queue has drained.
#[derive(Debug)]
struct Route {
    pattern: String,
    queue: VecDeque<MockResponse>,
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use flickr_watch::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response("method=flickr.photosets.getInfo", MockResponse::body(r#"{"stat":"ok"}"#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Routes checked in registration order
    routes: Arc<Mutex<Vec<Route>>>,
    /// Default response when no route matches
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever a pattern answers with a single sticky response.
    pub fn set_response(&self, pattern: &str, response: MockResponse) {
        self.set_sequence(pattern, vec![response]);
    }

    /// Answer a pattern with each response in turn, repeating the last.
    pub fn set_sequence(&self, pattern: &str, responses: Vec<MockResponse>) {
        let mut routes = lock(&self.routes);
        let queue: VecDeque<MockResponse> = responses.into();
        match routes.iter_mut().find(|r| r.pattern == pattern) {
            Some(route) => route.queue = queue,
            None => routes.push(Route {
                pattern: pattern.to_string(),
                queue,
            }),
        }
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Number of recorded requests whose URL contains `pattern`.
    pub fn request_count(&self, pattern: &str) -> usize {
        lock(&self.requests)
            .iter()
            .filter(|r| r.url.contains(pattern))
            .count()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    fn next_response(&self, url: &str) -> Option<MockResponse> {
        let mut routes = lock(&self.routes);
        if let Some(route) = routes.iter_mut().find(|r| url.contains(&r.pattern)) {
            return if route.queue.len() > 1 {
                route.queue.pop_front()
            } else {
                route.queue.front().cloned()
            };
        }
        lock(&self.default_response).clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        lock(&self.requests).push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
        });

        match self.next_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
