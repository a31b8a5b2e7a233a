use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;

use crate::api::response::ApiError;
use crate::blob_store::{storage_filename, BlobStoreError};
use crate::storage::models::RecordingRecord;
use crate::AppState;

/// Every stored blob is a WebM capture; playback responses carry this type.
const RECORDING_MIME: &str = "video/webm";

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingResponse {
    pub id: u64,
    pub filename: String,
    pub filepath: String,
    pub filesize: u64,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub id: u64,
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn upload_recording(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut video: Option<bytes::Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart data: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "video" => {
                let file_name = field.file_name().map(|s| s.to_string());
                let declared_type = field.content_type().map(|s| s.to_string());

                // Declared media type, or a guess from the client's filename
                // hint when the part carries none
                let media_type = declared_type
                    .filter(|ct| ct != "application/octet-stream")
                    .or_else(|| {
                        file_name
                            .as_deref()
                            .and_then(|n| mime_guess::from_path(n).first())
                            .map(|m| m.to_string())
                    })
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                if !media_type.starts_with("video/") {
                    return Err(ApiError::bad_request("Only video files allowed"));
                }

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;

                if data.len() as u64 > state.config.max_upload_size {
                    return Err(ApiError::payload_too_large(format!(
                        "File exceeds maximum upload size of {} bytes",
                        state.config.max_upload_size
                    )));
                }

                video = Some(data);
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let video = video.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    let filename = storage_filename(Utc::now());
    let filepath = format!("uploads/{filename}");
    let filesize = video.len() as u64;

    // Phase 1: Write the blob. A failure here must leave no row behind.
    state
        .blob_store
        .put(&filename, video)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store file: {e}")))?;

    // Phase 2: Insert the metadata row. A failure here leaves the written
    // blob orphaned on disk -- accepted leak, surfaced only in the logs.
    let record = state
        .db
        .insert_recording(&filename, &filepath, filesize)
        .map_err(|e| {
            tracing::warn!(%filename, error = %e, "Row insert failed; blob left orphaned");
            ApiError::internal("Database error")
        })?;

    tracing::debug!(id = record.id, %filename, filesize, "Stored recording");

    Ok(Json(UploadResponse {
        id: record.id,
        message: "Upload successful".to_string(),
    }))
}

pub async fn list_recordings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RecordingResponse>>, ApiError> {
    let records = state
        .db
        .list_recordings()
        .map_err(|e| ApiError::internal(format!("Database error: {e}")))?;

    Ok(Json(records.iter().map(recording_to_response).collect()))
}

pub async fn stream_recording(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    // Ids the store never assigned (including non-numeric ones) are a 404,
    // not a validation error
    let id: u64 = id
        .parse()
        .map_err(|_| ApiError::not_found("Recording not found"))?;

    let record = state
        .db
        .get_recording(id)
        .map_err(|e| ApiError::internal(format!("Database error: {e}")))?
        .ok_or_else(|| ApiError::not_found("Recording not found"))?;

    // A row whose blob has gone missing is surfaced, not repaired
    let reader = state
        .blob_store
        .stream(&record.filename)
        .await
        .map_err(|e| match e {
            BlobStoreError::NotFound(_) => ApiError::not_found("File not found"),
            _ => ApiError::internal(format!("Failed to retrieve file: {e}")),
        })?;

    let body = Body::from_stream(ReaderStream::new(reader));
    let mut response = (StatusCode::OK, body).into_response();
    let headers = response.headers_mut();

    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static(RECORDING_MIME),
    );

    headers.insert(
        header::CONTENT_LENGTH,
        header::HeaderValue::from(record.filesize),
    );

    if let Ok(value) = format!("inline; filename=\"{}\"", record.filename).parse() {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    // Blobs are immutable once uploaded
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("public, max-age=3600"),
    );

    Ok(response)
}

// ============================================================================
// Helpers
// ============================================================================

fn recording_to_response(record: &RecordingRecord) -> RecordingResponse {
    RecordingResponse {
        id: record.id,
        filename: record.filename.clone(),
        filepath: record.filepath.clone(),
        filesize: record.filesize,
        created_at: record.created_at.to_rfc3339(),
    }
}
