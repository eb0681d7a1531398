//! PowerPoint (.pptx) slide and speaker-notes extraction
//!
//! Slides are read in lexicographic entry order, so `slide10.xml` is emitted
//! before `slide2.xml`. Downstream consumers rely on the resulting labels, so
//! the order is kept as is rather than sorted numerically.

use super::archive::Archive;
use super::xml::{collect_text, XmlNode};
use super::FormatExtractor;
use crate::error::ExtractResult;
use crate::types::DocumentFormat;

const SLIDES_PREFIX: &str = "ppt/slides/";
const NOTES_PREFIX: &str = "ppt/notesSlides/";
const XML_SUFFIX: &str = ".xml";

/// Local name of DrawingML run text elements (`<a:t>`)
const RUN_TEXT_TAG: &str = "t";

/// Extractor for PowerPoint presentations
#[derive(Debug, Default, Clone, Copy)]
pub struct PptxExtractor;

impl PptxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FormatExtractor for PptxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pptx
    }

    fn extract(&self, data: &[u8]) -> ExtractResult<String> {
        let mut archive = Archive::open(data)?;

        let slides: Vec<String> = part_texts(&mut archive, SLIDES_PREFIX)
            .into_iter()
            .enumerate()
            .map(|(i, text)| format!("Slide {}:\n{}", i + 1, text))
            .collect();
        let notes = part_texts(&mut archive, NOTES_PREFIX);
        tracing::debug!("PPTX: {} slides with text, {} notes", slides.len(), notes.len());

        let mut content = slides.join("\n\n");
        if !notes.is_empty() {
            content.push_str("\n\nNotes:\n");
            content.push_str(&notes.join("\n\n"));
        }

        Ok(content.trim().to_string())
    }
}

/// Non-empty text of every XML part under `prefix`, in entry order.
/// Parts that cannot be read or parsed are skipped like empty ones.
fn part_texts(archive: &mut Archive<'_>, prefix: &str) -> Vec<String> {
    let mut texts = Vec::new();
    for path in archive.list_entries(prefix, XML_SUFFIX) {
        match part_text(archive, &path) {
            Ok(text) if !text.is_empty() => texts.push(text),
            Ok(_) => tracing::debug!("No text in {}", path),
            Err(e) => tracing::warn!("Skipping {}: {}", path, e),
        }
    }
    texts
}

fn part_text(archive: &mut Archive<'_>, path: &str) -> ExtractResult<String> {
    let xml = archive.read_text(path)?;
    let root = XmlNode::parse(&xml)?;
    let runs = collect_text(&root, RUN_TEXT_TAG);
    Ok(collapse_whitespace(&runs.join(" ")))
}

/// Collapse whitespace runs to a single space and trim
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
