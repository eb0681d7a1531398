//! Core types for the extraction service

pub mod document;
pub mod record;
pub mod response;

pub use document::{DocumentFormat, ExtractionOutcome, SourceDocument};
pub use record::{DocumentRecord, DocumentStatus, StoredDocument};
pub use response::{ExtractRequest, ExtractResponse, UploadRequest, UploadResponse};
