//! Document text extraction
//!
//! Each supported format has a [`FormatExtractor`]. The
//! [`DocumentExtractor`] classifies an input and routes it to one of them.

pub mod archive;
pub mod dispatcher;
pub mod docx;
pub mod fallback;
pub mod pdf;
pub mod pptx;
pub mod xml;

pub use dispatcher::DocumentExtractor;
pub use docx::DocxExtractor;
pub use fallback::Utf8Fallback;
pub use pdf::{PdfBackend, PdfExtractor, PdfPages};
pub use pptx::PptxExtractor;

use crate::error::ExtractResult;
use crate::types::DocumentFormat;

/// Trait for format-specific text extractors
pub trait FormatExtractor: Send + Sync {
    /// Format this extractor handles
    fn format(&self) -> DocumentFormat;

    /// Extract plain text from raw bytes
    fn extract(&self, data: &[u8]) -> ExtractResult<String>;
}
