//! XML → owned element tree.
//!
//! Only well-formedness is checked here. Whether the tree follows plist
//! conventions is the extractor's business.

use crate::utils::error::{ConvertError, Result};
use roxmltree::{Document, ParsingOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenation of the direct text children, untouched.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    fn from_xml(node: roxmltree::Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect();

        let children = node
            .children()
            .filter_map(|child| {
                if child.is_element() {
                    Some(Node::Element(Element::from_xml(child)))
                } else if child.is_text() {
                    child.text().map(|text| Node::Text(text.to_string()))
                } else {
                    None
                }
            })
            .collect();

        Element {
            name: node.tag_name().name().to_string(),
            attributes,
            children,
        }
    }
}

/// A parsed document. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    root: Element,
}

impl ParsedDocument {
    pub fn root(&self) -> &Element {
        &self.root
    }
}

/// Parses `raw_text` as XML. Plist files carry a DOCTYPE, so DTDs are allowed;
/// external subsets are never resolved.
pub fn parse(raw_text: &str) -> Result<ParsedDocument> {
    if raw_text.trim().is_empty() {
        return Err(ConvertError::parse("document is empty"));
    }

    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = Document::parse_with_options(raw_text, options)
        .map_err(|e| ConvertError::parse(e.to_string()))?;

    Ok(ParsedDocument {
        root: Element::from_xml(doc.root_element()),
    })
}
