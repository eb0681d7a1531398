//! API routes for the extraction server

pub mod documents;
pub mod extract;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    // Base64 inflates the payload by a third, plus room for the JSON envelope
    let upload_body_limit = max_upload_size / 3 * 4 + 64 * 1024;

    Router::new()
        .route(
            "/upload",
            post(upload::upload_document).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route("/extract", post(extract::extract_document))
        .route("/documents/:id", get(documents::get_document))
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "doc-extract",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Plain-text extraction for PDF, DOCX, PPTX and UTF-8 documents",
        "endpoints": {
            "POST /api/upload": "Store a base64-encoded document",
            "POST /api/extract": "Extract text from a stored document",
            "GET /api/documents/:id": "Get a document record"
        }
    }))
}
