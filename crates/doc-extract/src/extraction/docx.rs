//! Word (.docx) raw text extraction

use super::archive::Archive;
use super::xml::XmlNode;
use super::FormatExtractor;
use crate::error::ExtractResult;
use crate::types::DocumentFormat;

/// Main body part of a word-processing package
pub const DOCUMENT_ENTRY: &str = "word/document.xml";

/// Extractor for Word documents
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FormatExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract(&self, data: &[u8]) -> ExtractResult<String> {
        let mut archive = Archive::open(data)?;
        let xml = archive.read_text(DOCUMENT_ENTRY)?;
        let root = XmlNode::parse(&xml)?;

        let mut paragraphs = Vec::new();
        collect_paragraphs(&root, &mut paragraphs);
        tracing::debug!("DOCX body has {} paragraphs", paragraphs.len());

        let text = paragraphs
            .iter()
            .map(|p| p.trim_end())
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(text.trim().to_string())
    }
}

/// Text of every `w:p` in document order, tables and text boxes included
fn collect_paragraphs(node: &XmlNode, out: &mut Vec<String>) {
    if node.is("Choice") {
        return;
    }
    if node.is("p") {
        let mut text = String::new();
        paragraph_text(node, &mut text);
        out.push(text);
        return;
    }
    for child in node.children() {
        collect_paragraphs(child, out);
    }
}

fn paragraph_text(node: &XmlNode, out: &mut String) {
    for child in node.children() {
        match child.local_name() {
            // Property blocks carry tab stop definitions, not content
            Some("pPr") | Some("rPr") => {}
            // `mc:AlternateContent` repeats its content in `mc:Fallback`
            Some("Choice") => {}
            Some("t") => out.push_str(&child.text_content()),
            Some("tab") => out.push('\t'),
            Some("br") | Some("cr") => out.push('\n'),
            Some(_) => paragraph_text(child, out),
            None => {}
        }
    }
}
