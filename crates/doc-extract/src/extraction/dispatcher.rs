//! Format routing and failure normalization

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::docx::DocxExtractor;
use super::fallback::Utf8Fallback;
use super::pdf::{PdfBackend, PdfExtractor};
use super::pptx::PptxExtractor;
use super::FormatExtractor;
use crate::config::PdfConfig;
use crate::types::{DocumentFormat, ExtractionOutcome, SourceDocument};

/// Routes a document to its format extractor.
///
/// Every failure inside an extractor, panics included, degrades to an empty
/// outcome. Callers only ever see [`ExtractionOutcome`].
#[derive(Clone)]
pub struct DocumentExtractor {
    pdf: PdfExtractor,
    docx: DocxExtractor,
    pptx: PptxExtractor,
    text: Utf8Fallback,
}

impl DocumentExtractor {
    /// Create a dispatcher using the configured PDF backend
    pub fn new(config: &PdfConfig) -> Self {
        Self::with_pdf(PdfExtractor::new(config))
    }

    /// Create a dispatcher around an explicit PDF backend
    pub fn with_pdf_backend(backend: Arc<dyn PdfBackend>) -> Self {
        Self::with_pdf(PdfExtractor::with_backend(backend))
    }

    fn with_pdf(pdf: PdfExtractor) -> Self {
        Self {
            pdf,
            docx: DocxExtractor::new(),
            pptx: PptxExtractor::new(),
            text: Utf8Fallback::new(),
        }
    }

    /// Name of the PDF backend in use
    pub fn pdf_backend(&self) -> &str {
        self.pdf.backend_name()
    }

    fn extractor_for(&self, format: DocumentFormat) -> &dyn FormatExtractor {
        match format {
            DocumentFormat::Pdf => &self.pdf,
            DocumentFormat::Docx => &self.docx,
            DocumentFormat::Pptx => &self.pptx,
            DocumentFormat::Text => &self.text,
        }
    }

    /// Extract text from a document. Never fails and never panics.
    pub fn extract(&self, document: &SourceDocument) -> ExtractionOutcome {
        let extractor = self.extractor_for(document.format());
        let format = extractor.format();

        let result = panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(document.bytes())));
        match result {
            Ok(Ok(text)) => {
                let outcome = ExtractionOutcome::from_text(&text);
                tracing::debug!(
                    "Extracted {} chars from {} as {}",
                    outcome.text.len(),
                    document.filename(),
                    format.display_name()
                );
                outcome
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    "{} extraction failed for {}: {}",
                    format.display_name(),
                    document.filename(),
                    e
                );
                ExtractionOutcome::empty()
            }
            Err(_) => {
                tracing::error!(
                    "{} extractor panicked on {}",
                    format.display_name(),
                    document.filename()
                );
                ExtractionOutcome::empty()
            }
        }
    }

    /// Convenience wrapper over [`extract`](Self::extract) for borrowed inputs
    pub fn extract_bytes(&self, bytes: &[u8], filename: &str, mime_hint: &str) -> ExtractionOutcome {
        self.extract(&SourceDocument::new(bytes, filename, mime_hint))
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new(&PdfConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::super::archive::test_support::build_zip;
    use super::super::pdf::PdfPages;
    use super::*;
    use crate::error::ExtractResult;

    struct OnePageBackend(&'static str);

    struct OnePage(&'static str);

    impl PdfBackend for OnePageBackend {
        fn load(&self, _data: &[u8]) -> ExtractResult<Box<dyn PdfPages>> {
            Ok(Box::new(OnePage(self.0)))
        }

        fn name(&self) -> &str {
            "one-page"
        }
    }

    impl PdfPages for OnePage {
        fn page_count(&self) -> u32 {
            1
        }

        fn text_runs(&self, _page: u32) -> ExtractResult<Vec<String>> {
            Ok(vec![self.0.to_string()])
        }
    }

    struct ExplodingBackend;

    impl PdfBackend for ExplodingBackend {
        fn load(&self, _data: &[u8]) -> ExtractResult<Box<dyn PdfPages>> {
            panic!("xref table points outside the file");
        }

        fn name(&self) -> &str {
            "exploding"
        }
    }

    fn docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
            .collect();
        let xml = format!(r#"<w:document xmlns:w="w"><w:body>{}</w:body></w:document>"#, body);
        build_zip(&[("word/document.xml", xml.as_bytes())])
    }

    #[test]
    fn test_mime_wins_over_extension() {
        let extractor = DocumentExtractor::with_pdf_backend(Arc::new(OnePageBackend("from pdf")));
        let data = docx(&["from docx"]);

        let outcome = extractor.extract_bytes(&data, "x.docx", "application/pdf");
        assert_eq!(outcome.text, "from pdf");
        assert!(outcome.succeeded);
    }

    #[test]
    fn test_docx_by_extension() {
        let extractor = DocumentExtractor::default();
        let outcome = extractor.extract_bytes(&docx(&["Hello", "World"]), "Report.DOCX", "");
        assert_eq!(outcome.text, "Hello\n\nWorld");
        assert!(outcome.succeeded);
    }

    #[test]
    fn test_docx_without_body_is_empty_outcome() {
        let extractor = DocumentExtractor::default();
        let data = build_zip(&[("word/styles.xml", "<w:styles/>".as_bytes())]);
        let mime = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

        let outcome = extractor.extract_bytes(&data, "broken.docx", mime);
        assert_eq!(outcome, ExtractionOutcome::empty());
    }

    #[test]
    fn test_pptx_routed_by_mime() {
        let slide = r#"<p:sld xmlns:a="a" xmlns:p="p"><a:t>Roadmap</a:t></p:sld>"#;
        let data = build_zip(&[("ppt/slides/slide1.xml", slide.as_bytes())]);
        let mime = "application/vnd.openxmlformats-officedocument.presentationml.presentation";

        let outcome = DocumentExtractor::default().extract_bytes(&data, "deck", mime);
        assert_eq!(outcome.text, "Slide 1:\nRoadmap");
    }

    #[test]
    fn test_plain_text_fallback() {
        let extractor = DocumentExtractor::default();
        let outcome = extractor.extract_bytes(b"hello\n", "notes.txt", "text/plain");
        assert_eq!(outcome.text, "hello");
        assert!(outcome.succeeded);
    }

    #[test]
    fn test_invalid_utf8_fallback_fails_softly() {
        let extractor = DocumentExtractor::default();
        let outcome = extractor.extract_bytes(&[0xff, 0xfe, 0x00], "blob.bin", "application/octet-stream");
        assert_eq!(outcome.text, "");
        assert!(!outcome.succeeded);
    }

    #[test]
    fn test_whitespace_only_text_is_failure() {
        let outcome = DocumentExtractor::default().extract_bytes(b"  \n\t ", "blank.txt", "");
        assert!(!outcome.succeeded);
        assert_eq!(outcome.status(), crate::types::DocumentStatus::Error);
    }

    #[test]
    fn test_unparsable_pdf_is_empty_outcome() {
        let outcome = DocumentExtractor::default().extract_bytes(b"not a pdf", "a.pdf", "");
        assert_eq!(outcome, ExtractionOutcome::empty());
    }

    #[test]
    fn test_panicking_backend_is_contained() {
        let extractor = DocumentExtractor::with_pdf_backend(Arc::new(ExplodingBackend));
        let outcome = extractor.extract_bytes(b"%PDF-1.4", "a.pdf", "application/pdf");
        assert_eq!(outcome, ExtractionOutcome::empty());
    }

    #[test]
    fn test_each_format_routes_to_its_extractor() {
        let extractor = DocumentExtractor::default();
        for format in [
            DocumentFormat::Pdf,
            DocumentFormat::Docx,
            DocumentFormat::Pptx,
            DocumentFormat::Text,
        ] {
            assert_eq!(extractor.extractor_for(format).format(), format);
        }
    }

    #[test]
    fn test_deeply_nested_slide_is_skipped() {
        let depth = 200_000;
        let deep = format!(
            r#"<p:sld xmlns:a="a" xmlns:p="p">{}<a:t>lost</a:t>{}</p:sld>"#,
            "<a:g>".repeat(depth),
            "</a:g>".repeat(depth)
        );
        let fine = r#"<p:sld xmlns:a="a" xmlns:p="p"><a:t>Survivor</a:t></p:sld>"#;
        let data = build_zip(&[
            ("ppt/slides/slide1.xml", deep.as_bytes()),
            ("ppt/slides/slide2.xml", fine.as_bytes()),
        ]);

        let outcome = DocumentExtractor::default().extract_bytes(&data, "deep.pptx", "");
        assert_eq!(outcome.text, "Slide 1:\nSurvivor");
        assert!(outcome.succeeded);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = DocumentExtractor::default();
        let document = SourceDocument::new(docx(&["Same", "every time"]), "a.docx", "");

        let first = extractor.extract(&document);
        let second = extractor.extract(&document);
        assert_eq!(first, second);
    }
}
