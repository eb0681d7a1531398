//! Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DocumentStatus;

/// POST /api/extract body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractRequest {
    /// Document to extract; missing or empty is a 400
    #[serde(default)]
    pub doc_id: Option<String>,
}

/// POST /api/extract response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub doc_id: Uuid,
    pub status: DocumentStatus,
    /// Character count of the extracted text
    pub extracted_text_length: usize,
}

/// POST /api/upload body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub mime: Option<String>,
    /// Declared size in bytes, checked before decoding
    #[serde(default)]
    pub size: Option<u64>,
    /// File content, standard base64
    #[serde(default)]
    pub content_base64: Option<String>,
}

/// POST /api/upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub doc_id: Uuid,
    pub storage_path: String,
}
