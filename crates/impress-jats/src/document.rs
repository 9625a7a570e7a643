//! In-memory JATS document tree
//!
//! The article XML is read once with quick-xml into an owned element tree.
//! Selection uses a small path syntax relative to an element:
//!
//! - `front/article-meta/pub-date` walks child elements by qualified name
//! - `.` is the element itself
//! - `abstract|trans-abstract` is the union of two paths, in document order
//!
//! Every element records its position in the document so unions and scans
//! keep document order.

use std::path::Path;

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::error::DocumentError;
use crate::markup::{MarkupChild, MarkupNode};

/// Deepest element nesting accepted by [`JatsDocument::parse`]
///
/// Text collection and markup rendering walk the tree recursively, so the
/// limit also bounds their stack use.
pub const MAX_DEPTH: usize = 256;

/// A child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    order: usize,
}

impl Element {
    /// Qualified name, including any prefix (`mml:math`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the element's start tag among all elements of the document
    pub fn order(&self) -> usize {
        self.order
    }

    /// Attribute value by qualified name (`xml:lang`, `pub-id-type`)
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Language tag of the element, if present and non-blank
    pub fn lang(&self) -> Option<&str> {
        self.attribute("xml:lang")
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Trimmed text content
    pub fn text(&self) -> String {
        self.text_content().trim().to_string()
    }

    /// All elements matching `path`, in document order
    pub fn select(&self, path: &str) -> Vec<&Element> {
        let mut found: Vec<&Element> = path
            .split('|')
            .flat_map(|alternative| self.select_path(alternative.trim()))
            .collect();
        found.sort_by_key(|element| element.order);
        found.dedup_by_key(|element| element.order);
        found
    }

    /// First element matching `path`
    pub fn select_first(&self, path: &str) -> Option<&Element> {
        self.select(path).into_iter().next()
    }

    /// Trimmed text of the first element matching `path`
    ///
    /// Returns `None` when nothing matches or the text is blank.
    pub fn select_text(&self, path: &str) -> Option<String> {
        self.select_first(path)
            .map(Element::text)
            .filter(|text| !text.is_empty())
    }

    fn select_path(&self, path: &str) -> Vec<&Element> {
        let mut current = vec![self];
        for step in path.split('/').filter(|step| !step.is_empty()) {
            if step == "." {
                continue;
            }
            current = current
                .into_iter()
                .flat_map(|element| element.child_elements().filter(move |c| c.name == step))
                .collect();
        }
        current
    }
}

impl MarkupNode for Element {
    fn tag_name(&self) -> &str {
        &self.name
    }

    fn markup_children(&self) -> Vec<MarkupChild<'_, Self>> {
        self.children
            .iter()
            .map(|child| match child {
                Node::Text(text) => MarkupChild::Text(text),
                Node::Element(element) => MarkupChild::Element(element),
            })
            .collect()
    }
}

/// A parsed article document
#[derive(Debug, Clone, PartialEq)]
pub struct JatsDocument {
    root: Element,
}

impl JatsDocument {
    /// Parse an XML string
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut order = 0usize;

        loop {
            let position = reader.buffer_position();
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    if stack.len() >= MAX_DEPTH {
                        return Err(DocumentError::TooDeep {
                            position,
                            limit: MAX_DEPTH,
                        });
                    }
                    stack.push(start_element(e, order, position)?);
                    order += 1;
                }
                Ok(Event::Empty(ref e)) => {
                    let element = start_element(e, order, position)?;
                    order += 1;
                    attach(&mut stack, &mut root, element);
                }
                Ok(Event::End(_)) => {
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, &mut root, element);
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(unescape_text(e)));
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        parent.children.push(Node::Text(text));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(DocumentError::Xml {
                        position: reader.buffer_position(),
                        message: e.to_string(),
                    })
                }
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(DocumentError::Xml {
                position: reader.buffer_position(),
                message: format!("unclosed element <{}>", stack[stack.len() - 1].name),
            });
        }

        root.map(|root| Self { root }).ok_or(DocumentError::Empty)
    }

    /// Read and parse a file
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    /// The document element (`<article>`)
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Select relative to the document element
    pub fn select(&self, path: &str) -> Vec<&Element> {
        self.root.select(path)
    }

    pub fn select_first(&self, path: &str) -> Option<&Element> {
        self.root.select_first(path)
    }

    pub fn select_text(&self, path: &str) -> Option<String> {
        self.root.select_text(path)
    }
}

impl std::str::FromStr for JatsDocument {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn start_element(e: &BytesStart, order: usize, position: usize) -> Result<Element, DocumentError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| DocumentError::Xml {
            position,
            message: err.to_string(),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        order,
    })
}

/// Text with entities resolved; unknown named entities (common in
/// publisher exports) are kept verbatim rather than failing the document.
fn unescape_text(e: &BytesText) -> String {
    match e.unescape() {
        Ok(text) => text.into_owned(),
        Err(err) => {
            tracing::debug!("keeping unresolved entity text: {}", err);
            String::from_utf8_lossy(e).into_owned()
        }
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
