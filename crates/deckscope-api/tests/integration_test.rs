use axum::http::StatusCode;
use axum::response::IntoResponse;

use deckscope_api::error::ApiError;

#[tokio::test]
async fn test_bad_request_maps_to_400() {
    let error = ApiError::BadRequest("Only PDF files are supported".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_not_found_maps_to_404() {
    let error = ApiError::AnalysisNotFound("a-1".to_string());
    assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);

    let error = ApiError::ConversationNotFound("c-1".to_string());
    assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analysis_error_maps_to_500() {
    let error = ApiError::Analysis(anyhow::anyhow!("model unavailable"));
    assert_eq!(
        error.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_extract_timeout_maps_to_500() {
    let error = ApiError::Extract(deckscope_extract::ExtractError::Timeout(
        "job-1".to_string(),
        300,
    ));
    assert_eq!(
        error.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
