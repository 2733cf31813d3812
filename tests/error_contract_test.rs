//! Status and body contract for the API error taxonomy.

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;

use gym_catalog::api::error::ApiError;

async fn parts(error: ApiError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn invalid_argument_maps_to_400_with_error_body() {
    let error = ApiError::InvalidArgument("Name parameter is required".to_string());
    let (status, body) = tokio_test::block_on(parts(error));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name parameter is required");
}

#[test]
fn not_found_maps_to_404_with_message_body() {
    let (status, body) = tokio_test::block_on(parts(ApiError::NotFound("Exercise not found")));

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Exercise not found");
}

#[test]
fn store_failures_map_to_500_with_error_body() {
    let error = ApiError::Store(anyhow::anyhow!("connection reset"));
    let (status, body) = tokio_test::block_on(parts(error));

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "connection reset");
}

#[test]
fn store_conversion_covers_any_anyhow_error() {
    let source: anyhow::Error = anyhow::anyhow!("pool timed out");
    let error: ApiError = source.into();

    let (status, _) = tokio_test::block_on(parts(error));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
