//! PDF page-by-page text extraction
//!
//! Parsing is delegated to a [`PdfBackend`] chosen once from [`PdfConfig`].
//! A document that cannot be loaded yields no text; a page that cannot be
//! read contributes an empty string and the remaining pages are still
//! extracted.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use lopdf::{Document, ObjectId};

use crate::config::{PdfBackendKind, PdfConfig};
use crate::error::{ExtractError, ExtractResult};
use crate::types::DocumentFormat;

use super::FormatExtractor;

/// Separator placed between pages in the joined output
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Text of one page (1-indexed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTextRun {
    pub page_index: u32,
    pub text: String,
}

/// A PDF parsing capability
pub trait PdfBackend: Send + Sync {
    /// Parse the whole buffer into a page sequence
    fn load(&self, data: &[u8]) -> ExtractResult<Box<dyn PdfPages>>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// A loaded document's pages
pub trait PdfPages {
    fn page_count(&self) -> u32;

    /// Text fragments of page `page` (1-indexed), in content order
    fn text_runs(&self, page: u32) -> ExtractResult<Vec<String>>;
}

/// Build the backend named by the configuration
pub fn backend_for(kind: PdfBackendKind) -> Arc<dyn PdfBackend> {
    match kind {
        PdfBackendKind::Lopdf => Arc::new(LopdfBackend),
        PdfBackendKind::PdfExtract => Arc::new(PdfExtractBackend),
    }
}

/// Backend that reads each page's content stream with lopdf
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfBackend;

struct LopdfPages {
    doc: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfBackend for LopdfBackend {
    fn load(&self, data: &[u8]) -> ExtractResult<Box<dyn PdfPages>> {
        let doc = Document::load_mem(data)
            .map_err(|e| ExtractError::unparsable_pdf(format!("Failed to load PDF: {}", e)))?;
        let pages = doc.get_pages();
        Ok(Box::new(LopdfPages { doc, pages }))
    }

    fn name(&self) -> &str {
        "lopdf"
    }
}

impl PdfPages for LopdfPages {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn text_runs(&self, page: u32) -> ExtractResult<Vec<String>> {
        if !self.pages.contains_key(&page) {
            return Err(ExtractError::unparsable_pdf(format!("page {} not in page tree", page)));
        }
        let text = self
            .doc
            .extract_text(&[page])
            .map_err(|e| ExtractError::unparsable_pdf(format!("page {}: {}", page, e)))?;
        Ok(split_runs(&text))
    }
}

/// Backend using pdf-extract's layout-aware decoder, one page at a time
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractBackend;

struct DecodedPages {
    doc: pdf_extract::Document,
    page_count: u32,
}

impl PdfBackend for PdfExtractBackend {
    fn load(&self, data: &[u8]) -> ExtractResult<Box<dyn PdfPages>> {
        let mut doc = pdf_extract::Document::load_mem(data)
            .map_err(|e| ExtractError::unparsable_pdf(format!("Failed to load PDF: {}", e)))?;
        if doc.is_encrypted() {
            doc.decrypt("")
                .map_err(|e| ExtractError::unparsable_pdf(format!("Failed to decrypt PDF: {}", e)))?;
        }
        let page_count = doc.get_pages().len() as u32;
        Ok(Box::new(DecodedPages { doc, page_count }))
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}

impl PdfPages for DecodedPages {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn text_runs(&self, page: u32) -> ExtractResult<Vec<String>> {
        let mut text = String::new();
        {
            let mut output = pdf_extract::PlainTextOutput::new(&mut text);
            pdf_extract::output_doc_page(&self.doc, &mut output, page)
                .map_err(|e| ExtractError::unparsable_pdf(format!("page {}: {}", page, e)))?;
        }
        Ok(split_runs(&text))
    }
}

/// Non-empty lines of decoded page text, one run per line
fn split_runs(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extractor for PDF files
#[derive(Clone)]
pub struct PdfExtractor {
    backend: Arc<dyn PdfBackend>,
}

impl PdfExtractor {
    /// Create an extractor with the backend named in `config`
    pub fn new(config: &PdfConfig) -> Self {
        Self::with_backend(backend_for(config.backend))
    }

    /// Create an extractor around an explicit backend
    pub fn with_backend(backend: Arc<dyn PdfBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Extract every page in order. Pages that fail come back empty.
    pub fn extract_pages(&self, data: &[u8]) -> ExtractResult<Vec<PageTextRun>> {
        let document = self.backend.load(data)?;
        let page_count = document.page_count();
        tracing::debug!("PDF loaded with {} ({} pages)", self.backend.name(), page_count);

        let mut pages = Vec::with_capacity(page_count as usize);
        for page_index in 1..=page_count {
            let runs = panic::catch_unwind(AssertUnwindSafe(|| document.text_runs(page_index)));
            let text = match runs {
                Ok(Ok(runs)) => runs.join(" "),
                Ok(Err(e)) => {
                    tracing::warn!("Skipping PDF page {}: {}", page_index, e);
                    String::new()
                }
                Err(_) => {
                    tracing::warn!("Skipping PDF page {}: parser panicked", page_index);
                    String::new()
                }
            };
            pages.push(PageTextRun { page_index, text });
        }

        Ok(pages)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(&PdfConfig::default())
    }
}

impl FormatExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(&self, data: &[u8]) -> ExtractResult<String> {
        let pages = self.extract_pages(data)?;
        let joined = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR);
        Ok(joined.trim().to_string())
    }
}
