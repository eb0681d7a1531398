//! Text extraction endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{ExtractRequest, ExtractResponse, SourceDocument};

/// Extract text from a stored document and persist the result
///
/// POST /api/extract
pub async fn extract_document(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>> {
    let Json(request) = payload?;
    let doc_id = parse_doc_id(request.doc_id.as_deref())?;
    let store = state.document_store();

    let document = store.fetch_document(&doc_id).await?;
    tracing::info!(
        "Extracting {} ({}, {} bytes)",
        document.filename,
        document.mime,
        document.data.len()
    );

    let extractor = state.extractor();
    let source = SourceDocument::new(document.data, document.filename, document.mime);
    let outcome = tokio::task::spawn_blocking(move || extractor.extract(&source))
        .await
        .map_err(|e| Error::internal(format!("Task join error: {}", e)))?;

    let status = outcome.status();
    let text = outcome.succeeded.then_some(outcome.text.as_str());
    store.persist_result(&doc_id, text, status).await?;

    let extracted_text_length = outcome.text.chars().count();
    tracing::info!(
        "Document {} {} ({} chars)",
        doc_id,
        status.as_str(),
        extracted_text_length
    );

    Ok(Json(ExtractResponse {
        doc_id,
        status,
        extracted_text_length,
    }))
}

fn parse_doc_id(raw: Option<&str>) -> Result<Uuid> {
    let raw = raw
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::bad_request("Missing doc_id"))?;
    Uuid::parse_str(raw).map_err(|_| Error::bad_request(format!("Invalid doc_id: {}", raw)))
}
