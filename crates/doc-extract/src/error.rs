//! Error types for the extraction service

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for extraction engine operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Recoverable failures inside the extraction engine.
///
/// None of these ever reach a caller of [`crate::DocumentExtractor::extract`];
/// the dispatcher turns every one of them into an empty contribution.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Buffer is not a readable ZIP container
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    /// Named archive entry does not exist
    #[error("Archive entry missing: {0}")]
    EntryMissing(String),

    /// PDF structure could not be read at all
    #[error("Unparsable PDF: {0}")]
    UnparsablePdf(String),

    /// XML entry is not well formed
    #[error("Unparsable XML: {0}")]
    UnparsableXml(String),

    /// Bytes are not valid UTF-8
    #[error("Decode failure: {0}")]
    DecodeFailure(String),
}

impl ExtractError {
    /// Create a corrupt archive error
    pub fn corrupt_archive(message: impl Into<String>) -> Self {
        Self::CorruptArchive(message.into())
    }

    /// Create an unparsable PDF error
    pub fn unparsable_pdf(message: impl Into<String>) -> Self {
        Self::UnparsablePdf(message.into())
    }

    /// Create an unparsable XML error
    pub fn unparsable_xml(message: impl Into<String>) -> Self {
        Self::UnparsableXml(message.into())
    }
}

impl From<std::str::Utf8Error> for ExtractError {
    fn from(err: std::str::Utf8Error) -> Self {
        ExtractError::DecodeFailure(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for ExtractError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ExtractError::DecodeFailure(err.to_string())
    }
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        ExtractError::CorruptArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for ExtractError {
    fn from(err: quick_xml::Error) -> Self {
        ExtractError::UnparsableXml(err.to_string())
    }
}

/// Service errors surfaced by the storage and HTTP layers
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or incomplete request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Upload exceeds the configured limit
    #[error("Payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Storage or persistence failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::Json(_) => StatusCode::BAD_REQUEST,
            Error::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            Error::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Config(_) | Error::Storage(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_type, message) = match &self {
            Error::Config(msg) => ("config_error", msg.clone()),
            Error::BadRequest(msg) => ("bad_request", msg.clone()),
            Error::DocumentNotFound(id) => ("not_found", format!("doc not found: {}", id)),
            Error::PayloadTooLarge { .. } => ("payload_too_large", self.to_string()),
            Error::Storage(msg) => ("storage_error", msg.clone()),
            Error::Io(err) => ("io_error", err.to_string()),
            Error::Json(err) => ("json_error", err.to_string()),
            Error::Internal(msg) => ("internal_error", msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!("{}: {}", error_type, message);
        }

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
