//! Stored document records and their processing status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DocumentFormat;

/// Status of a stored document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Bytes stored, not yet extracted
    Uploaded,
    /// Extraction produced text
    Processed,
    /// Extraction produced no text
    Error,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Processed => "processed",
            Self::Error => "error",
        }
    }
}

/// Record of a stored document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Document ID
    pub id: Uuid,
    /// Original filename as uploaded
    pub filename: String,
    /// Declared MIME type
    pub mime: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Path of the raw bytes relative to the storage root
    pub storage_path: String,
    /// Processing status
    pub status: DocumentStatus,
    /// Extracted text, absent until a successful extraction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    /// When the document was uploaded
    pub created_at: DateTime<Utc>,
    /// When the record last changed
    pub updated_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Create a record for a freshly uploaded document
    pub fn uploaded(
        id: Uuid,
        filename: String,
        mime: String,
        size_bytes: u64,
        storage_path: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            filename,
            mime,
            size_bytes,
            storage_path,
            status: DocumentStatus::Uploaded,
            extracted_text: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an extraction result
    pub fn apply_result(&mut self, text: Option<&str>, status: DocumentStatus) {
        self.extracted_text = text.map(str::to_string);
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Format the dispatcher would route this document to
    pub fn format(&self) -> DocumentFormat {
        DocumentFormat::classify(&self.mime, &self.filename)
    }
}

/// Document bytes plus the metadata extraction needs
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: Uuid,
    pub filename: String,
    pub mime: String,
    pub data: Vec<u8>,
}
