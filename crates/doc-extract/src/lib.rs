//! doc-extract: plain-text extraction for PDF, Word, PowerPoint and UTF-8 documents
//!
//! The core is [`DocumentExtractor`], which classifies a document from its MIME
//! hint and filename, routes it to a format extractor and normalizes the result
//! to an [`ExtractionOutcome`]. Extraction never fails outward: any error inside
//! a format extractor degrades to empty text.
//!
//! Around the core sit a filesystem document store and an axum HTTP service
//! for uploading documents and persisting extraction results.

pub mod config;
pub mod error;
pub mod extraction;
pub mod providers;
pub mod server;
pub mod types;

pub use config::ExtractConfig;
pub use error::{Error, ExtractError, Result};
pub use extraction::{DocumentExtractor, FormatExtractor};
pub use types::{DocumentFormat, DocumentStatus, ExtractionOutcome, SourceDocument};
