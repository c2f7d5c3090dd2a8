//! Common test utilities for integration tests.
//!
//! Provides client configuration and Flickr response fixtures shared by the
//! envelope, client and subscription tests.
//!
//! # Example
//!
//! ```ignore
//! use common::{test_config, collections_response};
//!
//! let http = MockHttpClient::new();
//! http.set_response("collections.getTree", collections_response(&[("c1", &["s1"])]));
//! let client = FlickrClient::with_http(test_config(), Arc::new(http.clone()));
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use flickr_watch::config::{ClientConfig, OAuthConfig};
use serde_json::{json, Value};
use std::time::Duration;

pub const TEST_USER: &str = "60950751@N04";
pub const TEST_API_KEY: &str = "test-api-key";

/// Configuration pointing at an unreachable host, with a signing token.
pub fn test_config() -> ClientConfig {
    ClientConfig::new(
        TEST_USER,
        OAuthConfig::new(TEST_API_KEY, "test-secret").with_token("test-token", "test-token-secret"),
    )
    .with_base_url("http://flickr.test")
    .with_retry_delay(Duration::from_millis(10))
}

/// Configuration for a wiremock server.
pub fn server_config(uri: &str) -> ClientConfig {
    test_config().with_base_url(uri)
}

/// `{"stat":"ok", ...}` envelope around `body`.
pub fn ok(body: Value) -> Value {
    let mut envelope = json!({"stat": "ok"});
    if let (Some(target), Value::Object(fields)) = (envelope.as_object_mut(), body) {
        target.extend(fields);
    }
    envelope
}

/// `collections.getTree` response with one level of collections.
pub fn collections_json(tree: &[(&str, &[&str])]) -> Value {
    let collections: Vec<Value> = tree
        .iter()
        .map(|(id, sets)| {
            let sets: Vec<Value> = sets.iter().map(|s| json!({"id": s, "title": s})).collect();
            json!({"id": id, "title": id, "set": sets})
        })
        .collect();
    ok(json!({"collections": {"collection": collections}}))
}

/// `photosets.getInfo` response.
pub fn set_info_json(id: &str, date_update: i64) -> Value {
    ok(json!({"photoset": {
        "id": id,
        "owner": TEST_USER,
        "title": {"_content": "Test Set"},
        "description": {"_content": ""},
        "photos": 2,
        "date_create": "1356220800",
        "date_update": date_update.to_string()
    }}))
}

/// `photosets.getPhotos` response with `(photo id, lastupdate)` entries.
pub fn set_photos_json(id: &str, photos: &[(&str, i64)]) -> Value {
    let photo: Vec<Value> = photos
        .iter()
        .map(|(pid, t)| json!({"id": pid, "title": pid, "lastupdate": t.to_string()}))
        .collect();
    ok(json!({"photoset": {
        "id": id,
        "owner": TEST_USER,
        "page": 1,
        "pages": 1,
        "total": photo.len(),
        "photo": photo
    }}))
}

/// Flickr failure envelope.
pub fn fail_json(code: i64, message: &str) -> Value {
    json!({"stat": "fail", "code": code, "message": message})
}
