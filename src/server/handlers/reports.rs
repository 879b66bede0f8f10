use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::state::AppState;

const ACCEPTED_CONTENT_TYPES: [&str; 2] = ["application/pdf", "application/octet-stream"];

/// Accept a multipart PDF upload, extract its text, and ingest it into the
/// report pool. Rejections (wrong content type, unreadable or empty PDF)
/// happen before any engine work.
pub async fn upload_report(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(format!("Error reading uploaded file: {}", err)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !ACCEPTED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(ApiError::BadRequest(
                "Only PDF files are supported".to_string(),
            ));
        }

        let filename = field.file_name().unwrap_or("report.pdf").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::BadRequest(format!("Error reading uploaded file: {}", err)))?;

        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let (filename, bytes) = upload
        .ok_or_else(|| ApiError::BadRequest("Missing multipart field 'file'".to_string()))?;

    // Extraction parses the whole document; keep it off the async runtime.
    let text = tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(ApiError::internal)??;

    if text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "PDF appears to be empty or unreadable".to_string(),
        ));
    }

    let report_id = state.engine.ingest_report(&filename, &text).await?;

    Ok(Json(json!({
        "report_id": report_id,
        "filename": filename,
    })))
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, ApiError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|err| ApiError::BadRequest(format!("Error parsing PDF: {}", err)))
}
