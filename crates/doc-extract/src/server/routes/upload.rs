//! Document upload endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{UploadRequest, UploadResponse};

/// Store a base64-encoded document with status `uploaded`
///
/// POST /api/upload
pub async fn upload_document(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<UploadResponse>> {
    let Json(request) = payload?;
    let (filename, mime, content) = match (
        non_empty(request.filename),
        non_empty(request.mime),
        non_empty(request.content_base64),
    ) {
        (Some(filename), Some(mime), Some(content)) => (filename, mime, content),
        _ => {
            return Err(Error::bad_request(
                "Missing required fields: filename, mime, contentBase64",
            ))
        }
    };

    let max = state.config().server.max_upload_size;
    if let Some(size) = request.size {
        if size > max as u64 {
            return Err(Error::PayloadTooLarge {
                size: size as usize,
                max,
            });
        }
    }

    let data = STANDARD
        .decode(content.trim())
        .map_err(|e| Error::bad_request(format!("Invalid contentBase64: {}", e)))?;
    if data.len() > max {
        return Err(Error::PayloadTooLarge {
            size: data.len(),
            max,
        });
    }

    let doc_id = Uuid::new_v4();
    let storage_path = state
        .document_store()
        .store_document(&doc_id, &filename, &mime, &data)
        .await?;

    tracing::info!("Uploaded {} as {} ({} bytes)", filename, doc_id, data.len());

    Ok(Json(UploadResponse {
        doc_id,
        storage_path,
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
