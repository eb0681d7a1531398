//! Document record endpoint

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::DocumentRecord;

/// Get a document's stored record, without its bytes
///
/// GET /api/documents/:id
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentRecord>> {
    let doc_id =
        Uuid::parse_str(&id).map_err(|_| Error::bad_request(format!("Invalid doc_id: {}", id)))?;
    let record = state.document_store().get_record(&doc_id).await?;
    Ok(Json(record))
}
