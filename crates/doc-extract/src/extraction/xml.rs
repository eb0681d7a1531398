//! XML parsing into a small typed tree, and text harvesting over it
//!
//! Office Open XML parts are parsed into [`XmlNode`] values and then walked
//! recursively. Matching is done on the local tag name with the namespace
//! prefix stripped, so `<a:t>`, `<p:t>` and `<t>` all match `"t"` no matter
//! how deeply they are nested.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ExtractError, ExtractResult};

/// Deepest element nesting accepted by [`XmlNode::parse`]. The tree walks
/// recurse per level, so deeper input is rejected instead of built.
pub const MAX_DEPTH: usize = 1024;

/// One node of a parsed XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element {
        /// Qualified tag name, prefix included (`a:t`)
        name: String,
        attrs: Vec<(String, String)>,
        children: Vec<XmlNode>,
    },
    Text(String),
}

impl XmlNode {
    /// Parse a whole document and return its root element
    pub fn parse(xml: &str) -> ExtractResult<XmlNode> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        // Open elements, innermost last
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    check_depth(&stack)?;
                    stack.push(element_from(&e)?);
                }
                Event::Empty(e) => {
                    check_depth(&stack)?;
                    let node = element_from(&e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::End(_) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| ExtractError::unparsable_xml("unexpected closing tag"))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::Text(e) => {
                    let text = e
                        .unescape()
                        .map_err(|err| ExtractError::unparsable_xml(err.to_string()))?;
                    if let Some(parent) = stack.last_mut() {
                        parent.push_child(XmlNode::Text(text.into_owned()));
                    }
                }
                Event::CData(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8(e.into_inner().into_owned())?;
                        parent.push_child(XmlNode::Text(text));
                    }
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(ExtractError::unparsable_xml("unclosed element at end of input"));
        }
        root.ok_or_else(|| ExtractError::unparsable_xml("document has no root element"))
    }

    /// Qualified name for elements, `None` for text
    pub fn name(&self) -> Option<&str> {
        match self {
            XmlNode::Element { name, .. } => Some(name),
            XmlNode::Text(_) => None,
        }
    }

    /// Tag name with any namespace prefix removed
    pub fn local_name(&self) -> Option<&str> {
        self.name().map(strip_prefix)
    }

    pub fn children(&self) -> &[XmlNode] {
        match self {
            XmlNode::Element { children, .. } => children,
            XmlNode::Text(_) => &[],
        }
    }

    /// Attribute value by qualified name
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            XmlNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            XmlNode::Text(_) => None,
        }
    }

    /// Whether this is an element with the given local name
    pub fn is(&self, local: &str) -> bool {
        self.local_name() == Some(local)
    }

    /// Concatenation of every text node below this one, in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.append_text(&mut out);
        out
    }

    fn append_text(&self, out: &mut String) {
        match self {
            XmlNode::Text(text) => out.push_str(text),
            XmlNode::Element { children, .. } => {
                for child in children {
                    child.append_text(out);
                }
            }
        }
    }

    fn push_child(&mut self, child: XmlNode) {
        if let XmlNode::Element { children, .. } = self {
            children.push(child);
        }
    }
}

/// Strip a `prefix:` from a qualified name
pub fn strip_prefix(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Text of every element whose local name is `tag`, in document order.
///
/// Ancestry is ignored: a match at any depth is collected. Matches are not
/// searched for nested matches of their own.
pub fn collect_text(root: &XmlNode, tag: &str) -> Vec<String> {
    let mut out = Vec::new();
    collect_into(root, tag, &mut out);
    out
}

fn collect_into(node: &XmlNode, tag: &str, out: &mut Vec<String>) {
    if node.is(tag) {
        out.push(node.text_content());
        return;
    }
    for child in node.children() {
        collect_into(child, tag, out);
    }
}

fn check_depth(stack: &[XmlNode]) -> ExtractResult<()> {
    if stack.len() >= MAX_DEPTH {
        return Err(ExtractError::unparsable_xml(format!(
            "element nesting deeper than {}",
            MAX_DEPTH
        )));
    }
    Ok(())
}

fn element_from(start: &BytesStart<'_>) -> ExtractResult<XmlNode> {
    let name = String::from_utf8(start.name().as_ref().to_vec())?;
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ExtractError::unparsable_xml(e.to_string()))?;
        let key = String::from_utf8(attr.key.as_ref().to_vec())?;
        let value = attr
            .unescape_value()
            .map_err(|e| ExtractError::unparsable_xml(e.to_string()))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(XmlNode::Element {
        name,
        attrs,
        children: Vec::new(),
    })
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> ExtractResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(ExtractError::unparsable_xml("multiple root elements")),
    }
    Ok(())
}
