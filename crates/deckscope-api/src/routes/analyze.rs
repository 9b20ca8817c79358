use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use deckscope_analysis::AnalysisReport;
use deckscope_chat::AnalysisContext;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Upload size limit (20MB)
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Analyze an uploaded pitch-deck PDF for IPO readiness
///
/// The file is staged to a temp path, parsed by the external service, and
/// scored; the resulting context is registered for follow-up chat.
#[utoipa::path(
    post,
    path = "/analyze-pdf",
    responses(
        (status = 200, description = "Full analysis report"),
        (status = 400, description = "Not a PDF or over the size limit"),
        (status = 500, description = "Extraction or analysis failed")
    ),
    tag = "analysis"
)]
pub async fn analyze_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Json<AnalysisReport>> {
    let (filename, data) = read_upload(multipart).await?;
    validate_upload(&filename, &data)?;

    tracing::info!(filename = %filename, size = data.len(), "Processing uploaded PDF");

    // Stage the upload to a temp path for the parsing client; the directory
    // is removed on drop.
    let staging = tempfile::tempdir()?;
    let staged_path = staging.path().join("upload.pdf");
    tokio::fs::write(&staged_path, &data).await?;

    let document = state.extractor.parse_file(&staged_path, &filename).await?;
    let report = state.analyzer.analyze(&document, &filename).await?;

    state
        .chat
        .store_context(AnalysisContext::from_analysis(document, report.clone()));

    Ok(Json(report))
}

async fn read_upload(mut multipart: Multipart) -> ApiResult<(String, Bytes)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .unwrap_or("upload.pdf")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            return Ok((filename, data));
        }
    }

    Err(ApiError::BadRequest("Missing file field".to_string()))
}

fn validate_upload(filename: &str, data: &Bytes) -> ApiResult<()> {
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(ApiError::BadRequest(
            "Only PDF files are supported".to_string(),
        ));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::BadRequest(
            "File size must be less than 20MB".to_string(),
        ));
    }
    Ok(())
}
