//! Mock transports for integration tests.

use flickr_watch::adapters::mock::{MockHttpClient, MockResponse};
use flickr_watch::constants::REST_PATH;
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{collections_json, set_info_json, set_photos_json};

/// Mount a JSON response for one Flickr method on a wiremock server.
pub async fn mount_method(server: &MockServer, flickr_method: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(REST_PATH))
        .and(query_param("method", format!("flickr.{}", flickr_method)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// In-memory Flickr account with one level of collections, for driving the
/// poller with paused time.
#[derive(Clone, Default)]
pub struct FakeFlickr {
    pub http: MockHttpClient,
}

impl FakeFlickr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tree(&self, tree: &[(&str, &[&str])]) {
        self.http.set_response(
            "method=flickr.collections.getTree",
            MockResponse::json(collections_json(tree)),
        );
    }

    pub fn set_info(&self, id: &str, date_update: i64) {
        self.http.set_response(
            &format!("method=flickr.photosets.getInfo&photoset_id={}", id),
            MockResponse::json(set_info_json(id, date_update)),
        );
    }

    pub fn set_photos(&self, id: &str, photos: &[(&str, i64)]) {
        self.http.set_response(
            &format!("method=flickr.photosets.getPhotos&photoset_id={}", id),
            MockResponse::json(set_photos_json(id, photos)),
        );
    }

    pub fn set_raw(&self, pattern: &str, response: MockResponse) {
        self.http.set_response(pattern, response);
    }
}
