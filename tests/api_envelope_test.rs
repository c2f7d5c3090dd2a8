//! Request envelope tests against a wiremock server.
//!
//! These go through the reqwest transport, so query strings, headers and
//! retry counts are checked as Flickr would see them.

mod common;

use common::*;
use flickr_watch::api::{ApiEnvelope, Identity, Request};
use flickr_watch::adapters::ReqwestHttpClient;
use flickr_watch::constants::REST_PATH;
use flickr_watch::{ApiError, FlickrClient};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> Arc<FlickrClient> {
    FlickrClient::new(server_config(&server.uri()))
}

#[tokio::test]
async fn test_sends_standard_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(REST_PATH))
        .and(query_param("api_key", TEST_API_KEY))
        .and(query_param("format", "json"))
        .and(query_param("nojsoncallback", "1"))
        .and(query_param("method", "flickr.collections.getTree"))
        .and(query_param("user_id", TEST_USER))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(collections_json(&[("c1", &["s1", "s2"])])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let collections = client(&server).get_collections(false).await.unwrap();

    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].set.len(), 2);
}

#[tokio::test]
async fn test_retries_html_error_page_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("method", "flickr.photosets.getInfo"))
        .respond_with(
            ResponseTemplate::new(503).set_body_string("<HTML><body>Service Unavailable</body></HTML>"),
        )
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    mount_method(&server, "photosets.getInfo", set_info_json("72157", 1517718861)).await;

    let info = client(&server).get_set_info("72157", false).await.unwrap();

    assert_eq!(info.id, "72157");
    assert_eq!(info.last_update(), 1517718861);
}

#[tokio::test]
async fn test_abandons_after_max_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("method", "flickr.photosets.getPhotos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fail_json(105, "Service currently unavailable")),
        )
        // first attempt plus three retries
        .expect(4)
        .mount(&server)
        .await;

    let result = client(&server).get_set_photos("72157", &[], false).await;

    match result {
        Err(ApiError::RetryExhausted { method, id, attempts, .. }) => {
            assert_eq!(method, "photosets.getPhotos");
            assert_eq!(id, "72157");
            assert_eq!(attempts, 4);
        }
        other => panic!("expected RetryExhausted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("method", "flickr.photos.getInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fail_json(1, "Photo not found")))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).get_photo_info("404").await.unwrap_err();

    assert!(matches!(err, ApiError::NotFound { .. }));
    assert!(!err.is_retryable());
    assert_eq!(err.to_string(), "Flickr photos.getInfo failed for photo_id 404: not found");
}

#[tokio::test]
async fn test_unexpected_shape_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("method", "flickr.photos.getSizes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stat": "ok", "sizes": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).get_photo_sizes("1").await.unwrap_err();

    match err {
        ApiError::SelectorMismatch { method, field } => {
            assert_eq!(method, "photos.getSizes");
            assert_eq!(field, "/sizes/size");
        }
        other => panic!("expected SelectorMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_escaped_quotes_are_unescaped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("method", "flickr.photos.getInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"stat":"ok","photo":{"id":"1","title":{"_content":"Tony\'s ride"}}}"#,
        ))
        .mount(&server)
        .await;

    let info = client(&server).get_photo_info("1").await.unwrap();
    assert_eq!(info.title.content, "Tony's ride");
}

#[tokio::test]
async fn test_cached_result_is_reused() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("method", "flickr.photos.getExif"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "ok",
            "photo": {"id": "1", "exif": [
                {"tagspace": "ExifIFD", "tagspaceid": 0, "tag": "ExposureTime", "label": "Exposure", "raw": {"_content": "1/250"}}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FlickrClient::new(server_config(&server.uri()).with_use_cache(true));
    let first = client.get_exif("1").await.unwrap();
    let second = client.get_exif("1").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].raw.content, "1/250");
}

#[tokio::test]
async fn test_signed_search_sends_oauth_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("method", "flickr.photos.search"))
        .and(query_param("tags", "horse,trail"))
        .and(query_param("sort", "relevance"))
        .and(query_param("per_page", "500"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "ok",
            "photos": {"page": 1, "photo": [{"id": "9", "url_l": "https://live.staticflickr.com/9_l.jpg"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let photos = client(&server).photo_search(&["horse", "trail"]).await.unwrap();

    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].extras["url_l"], "https://live.staticflickr.com/9_l.jpg");
}

#[tokio::test]
async fn test_envelope_returns_selected_value() {
    let server = MockServer::start().await;
    mount_method(
        &server,
        "photos.getAllContexts",
        json!({"stat": "ok", "set": [{"id": "1", "title": "A"}], "pool": []}),
    )
    .await;

    let config = Arc::new(server_config(&server.uri()));
    let api = ApiEnvelope::new(Arc::new(ReqwestHttpClient::new()), None, config);

    let value: Value = api
        .call("photos.getAllContexts", &Identity::photo("9"), &Request::new("/set"))
        .await
        .unwrap();
    assert_eq!(value, json!([{"id": "1", "title": "A"}]));
}

#[tokio::test]
async fn test_empty_body_is_retried_then_abandoned() {
    // no mocks mounted: wiremock answers 404 with an empty body
    let server = MockServer::start().await;

    let client = FlickrClient::new(server_config(&server.uri()).with_max_retries(1));
    let err = client.get_collections(false).await.unwrap_err();

    assert!(matches!(err, ApiError::RetryExhausted { attempts: 2, .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
