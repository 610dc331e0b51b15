mod common;

use calsearch::components::search::{request_schema, SearchHandle, SearchRequest, ToolResponse};
use calsearch::config::{Config, DEFAULT_API_BASE_URL};
use calsearch::startup::{build_service, handle_line};
use common::{event, service, service_without_token, MockCalendar};
use std::sync::Arc;

fn personal_calendar() -> MockCalendar {
    MockCalendar::new()
        .with_calendar("me@example.com", "Personal", "owner")
        .with_events(
            "me@example.com",
            vec![event("cut", "Barbershop appointment", "2026-10-20T15:00:00Z")],
        )
}

/// Smoke test to verify the default config is usable
#[tokio::test]
async fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.fetch_policy.text_floor, 100);
    assert!(config.validate().is_ok());
}

/// The production wiring builds without touching the network
#[tokio::test]
async fn test_build_service_with_env_token() {
    let config = Config {
        access_token: Some("token".to_string()),
        ..Config::default()
    };
    assert!(build_service(&config).is_ok());
}

/// Requests go through the actor and come back intact
#[tokio::test]
async fn test_search_handle_round_trip() {
    let handle = SearchHandle::new(service(Arc::new(personal_calendar())));

    let request = SearchRequest {
        text_query: Some("barber".to_string()),
        ..Default::default()
    };
    let response = handle.search(request).await.unwrap();

    assert_eq!(response.result.events.len(), 1);
    assert_eq!(response.result.events[0].source_display_name, "Personal");

    assert!(handle.shutdown().await.is_ok());
}

/// A JSON line becomes a JSON response with the structured payload
#[tokio::test]
async fn test_handle_line_success() {
    let handle = SearchHandle::new(service(Arc::new(personal_calendar())));

    let response = handle_line(&handle, r#"{"textQuery": "BARBER", "maxTotalResults": 5}"#).await;
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["isError"], false);
    assert_eq!(json["structured"]["items"][0]["title"], "Barbershop appointment");
    assert_eq!(json["structured"]["sourcesSearched"][0], "Personal");
    assert!(json["text"].as_str().unwrap().contains("Found 1 event in Personal"));
}

/// Malformed input yields an error response rather than a crash
#[tokio::test]
async fn test_handle_line_malformed_json() {
    let handle = SearchHandle::new(service(Arc::new(MockCalendar::new())));

    let response = handle_line(&handle, "{not json").await;

    assert!(response.is_error);
    assert!(response.structured.is_none());
}

/// Errors never carry a partial payload
#[tokio::test]
async fn test_error_response_shape() {
    let handle = SearchHandle::new(service_without_token(Arc::new(personal_calendar())));

    let response: ToolResponse = handle.search(SearchRequest::default()).await.into();

    assert!(response.is_error);
    assert!(response.text.contains("Authentication required"));
    assert!(response.structured.is_none());
}

#[test]
fn test_request_schema_available() {
    let schema = request_schema();
    assert!(schema["properties"]["textQuery"].is_object());
}
