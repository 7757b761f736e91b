//! Integration tests for the three service calls

use crate::integration::mock_server::MockServerFixture;
use serde_json::json;
use snare_client::{ListingField, ManualListing};

#[tokio::test]
async fn test_health_check_accepts_any_success() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json(
            "GET",
            "/",
            200,
            r#"{"message":"Welcome to SNARE WEB API"}"#,
        )
        .await;

    tokio_test::assert_ok!(fixture.client().health_check().await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_check_listing_passes_body_through() {
    let mut fixture = MockServerFixture::new().await;
    let body = json!({
        "name": "Unit 4B",
        "is_suspicious": true,
        "confidence_score": 0.87,
        "anomaly_score": -0.31,
        "model_predictions": {"isolation_forest": -1, "one_class_svm": -1},
        "analysis": {"price_per_sqft": "low"},
        "scraped_data": {"price": 650, "city": "Orlando"},
        "model_version": "2024.03"
    });
    let mock = fixture
        .mock_json_expecting(
            "/check_listing",
            json!({"url": "http://example.com/listing/1"}),
            &body.to_string(),
        )
        .await;

    let result = fixture
        .client()
        .check_listing("http://example.com/listing/1")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(result.is_suspicious);
    assert_eq!(result.name.as_deref(), Some("Unit 4B"));
    assert_eq!(serde_json::to_value(&result).unwrap(), body);
}

#[tokio::test]
async fn test_content_type_can_be_overridden() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/check_listing")
        .match_header("content-type", "application/json; charset=utf-8")
        .with_status(200)
        .with_body(r#"{"is_suspicious":false,"confidence_score":0.1}"#)
        .create_async()
        .await;

    let result = fixture
        .client()
        .check_listing_with_headers(
            "http://example.com/listing/2",
            vec![(
                "Content-Type".to_string(),
                "application/json; charset=utf-8".to_string(),
            )],
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(!result.is_suspicious);
}

#[tokio::test]
async fn test_check_manual_listing_payload() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_expecting(
            "/check_manual_listing",
            json!({
                "name": "Garden flat",
                "price": 1200.0,
                "postal_code": "32801",
                "bedrooms": 2,
                "description": "Hello",
                "latitude": null,
                "longitude": null
            }),
            r#"{"name":"Garden flat","is_suspicious":false,"confidence_score":0.64}"#,
        )
        .await;

    let mut listing = ManualListing::default();
    for (field, raw) in [
        (ListingField::Name, "Garden flat"),
        (ListingField::Price, "1200"),
        (ListingField::PostalCode, "32801"),
        (ListingField::Bedrooms, "2"),
        (ListingField::Description, "<script>alert(1)</script>Hello"),
    ] {
        snare_client::validation::apply_field(&mut listing, field, raw).unwrap();
    }

    let result = fixture
        .client()
        .check_manual_listing(&listing)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(!result.is_suspicious);
    assert_eq!(result.confidence_percent(), 64);
}

#[tokio::test]
async fn test_manual_listing_carries_id_and_timestamp() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/check_manual_listing")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::Regex(r#""listing_id":"manual-[0-9a-f-]{36}""#.to_string()),
            mockito::Matcher::Regex(r#""timestamp":"\d{4}-\d{2}-\d{2}T"#.to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"is_suspicious":true,"confidence_score":0.5}"#)
        .create_async()
        .await;

    fixture
        .client()
        .check_manual_listing(&ManualListing::default())
        .await
        .unwrap();

    mock.assert_async().await;
}
