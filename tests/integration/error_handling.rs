//! Integration tests for failure classification at the client boundary

use crate::integration::mock_server::{
    client_for, closed_address, dropping_server, silent_server, MockServerFixture,
};
use snare_client::{Error, FailureCategory};
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_timeout_is_classified() {
    let base_url = silent_server().await;
    let client = client_for(&base_url, Duration::from_millis(200));

    let started = Instant::now();
    let err = client
        .check_listing("http://example.com/listing/1")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout), "unexpected error: {:?}", err);
    assert_eq!(err.category(), FailureCategory::Timeout);
    assert!(err.to_string().contains("check your connection"));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_nothing_listening_is_unreachable() {
    let client = client_for(&closed_address(), Duration::from_secs(5));

    let err = client
        .check_listing("http://example.com/listing/1")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unreachable), "unexpected error: {:?}", err);
    assert_eq!(err.category(), FailureCategory::Unreachable);
    assert!(err.to_string().contains("backend is running"));
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json("POST", "/check_listing", 500, r#"{"detail":"boom"}"#)
        .await;

    let err = fixture
        .client()
        .check_listing("http://example.com/listing/1")
        .await
        .unwrap_err();

    match &err {
        Error::HttpStatus {
            status,
            status_text,
        } => {
            assert_eq!(*status, 500);
            assert_eq!(status_text, "Internal Server Error");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    assert_eq!(err.category(), FailureCategory::Other);
}

#[tokio::test]
async fn test_malformed_body_is_other() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json("POST", "/check_listing", 200, "<html>not json</html>")
        .await;

    let err = fixture
        .client()
        .check_listing("http://example.com/listing/1")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Other(_)), "unexpected error: {:?}", err);
    // serde_json's own message, unprefixed
    assert!(err.to_string().starts_with("expected value"), "got: {}", err);
}

#[tokio::test]
async fn test_connection_closed_before_response_is_unreachable() {
    let client = client_for(&dropping_server().await, Duration::from_secs(5));

    let err = client
        .check_listing("http://example.com/listing/1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unreachable), "unexpected error: {:?}", err);
    assert_eq!(err.category(), FailureCategory::Unreachable);

    let err = client.health_check().await.unwrap_err();
    assert!(matches!(err, Error::Unreachable), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_no_retry_on_failure() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/check_listing")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let err = fixture
        .client()
        .check_listing("http://example.com/listing/1")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_health_check_failure_is_reported() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_json("GET", "/", 503, "{}").await;

    let err = fixture.client().health_check().await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));

    let offline = client_for(&closed_address(), Duration::from_secs(5));
    assert!(matches!(
        offline.health_check().await.unwrap_err(),
        Error::Unreachable
    ));
}

#[tokio::test]
async fn test_blank_url_rejected_before_request() {
    let client = client_for(&closed_address(), Duration::from_secs(5));
    let err = client.check_listing("   ").await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}
