//! Source document, format classification and extraction outcome

use serde::{Deserialize, Serialize};

/// Document formats the dispatcher routes between
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx, and legacy .doc routed to the same path)
    Docx,
    /// Microsoft PowerPoint presentation (.pptx)
    Pptx,
    /// Anything else, decoded as UTF-8 text
    Text,
}

impl DocumentFormat {
    /// Classify a document from its MIME hint and filename.
    ///
    /// Checks run in a fixed order and the first match wins, so a buffer
    /// labelled `application/pdf` but named `x.docx` is treated as PDF.
    /// Either signal alone is enough to select a format.
    pub fn classify(mime_hint: &str, filename: &str) -> Self {
        let mime = mime_hint.to_lowercase();
        let name = filename.to_lowercase();

        if mime.contains("pdf") || name.ends_with(".pdf") {
            Self::Pdf
        } else if mime.contains("word") || name.ends_with(".docx") || name.ends_with(".doc") {
            Self::Docx
        } else if mime.contains("presentation") || name.ends_with(".pptx") {
            Self::Pptx
        } else {
            Self::Text
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word Document",
            Self::Pptx => "PowerPoint",
            Self::Text => "Text",
        }
    }
}

/// Input to one extraction call
#[derive(Debug, Clone)]
pub struct SourceDocument {
    bytes: Vec<u8>,
    filename: String,
    mime_hint: String,
}

impl SourceDocument {
    /// Create a new source document
    pub fn new(bytes: impl Into<Vec<u8>>, filename: impl Into<String>, mime_hint: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: filename.into(),
            mime_hint: mime_hint.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_hint(&self) -> &str {
        &self.mime_hint
    }

    /// Format this document is routed to
    pub fn format(&self) -> DocumentFormat {
        DocumentFormat::classify(&self.mime_hint, &self.filename)
    }
}

/// Normalized result of an extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Extracted text, always trimmed
    pub text: String,
    /// False exactly when `text` is empty
    pub succeeded: bool,
}

impl ExtractionOutcome {
    /// Build an outcome from raw extracted text, trimming it first
    pub fn from_text(text: &str) -> Self {
        let text = text.trim().to_string();
        let succeeded = !text.is_empty();
        Self { text, succeeded }
    }

    /// Outcome for an input that yielded no text
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            succeeded: false,
        }
    }

    /// Persisted status for this outcome
    pub fn status(&self) -> super::DocumentStatus {
        if self.succeeded {
            super::DocumentStatus::Processed
        } else {
            super::DocumentStatus::Error
        }
    }
}
