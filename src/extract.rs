//! Path-based extraction over loosely-structured XML responses.
//!
//! The registry's responses are not schema-validated locally; fields are
//! pulled by local name, ignoring namespaces, the way the service's own
//! examples address them. Queries walk the tree in document order
//! (pre-order), and when a name matches more than one node the first match
//! wins. That precedence is a documented policy of this client, not an
//! ambiguity error.
//!
//! Optional fields are read through the `optional_*` accessors, which turn
//! "zero matches" into `None` instead of an error. Required fields use the
//! `required_*` accessors and fail with [`Error::UnexpectedResponse`].

use crate::error::{Error, Result};
use std::io::Cursor;
use xmltree::{Element, XMLNode};

/// A parsed response document plus the verbatim XML it came from.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
    raw: String,
}

impl Document {
    /// Parse a raw response. Unparseable payloads are a protocol violation.
    pub fn parse(xml: &str) -> Result<Self> {
        let root = Element::parse(Cursor::new(xml.as_bytes())).map_err(|e| {
            Error::UnexpectedResponse {
                reason: format!("response is not parseable XML: {}", e),
            }
        })?;
        Ok(Self {
            root,
            raw: xml.to_string(),
        })
    }

    /// Root element of the document.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The verbatim XML this document was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// All descendants (including the root) whose local name matches, in
/// document order.
pub fn find_all<'a>(root: &'a Element, local_name: &str) -> Vec<&'a Element> {
    let mut matches = Vec::new();
    collect(root, local_name, &mut matches);
    matches
}

fn collect<'a>(node: &'a Element, local_name: &str, out: &mut Vec<&'a Element>) {
    if node.name == local_name {
        out.push(node);
    }
    for child in &node.children {
        if let XMLNode::Element(elem) = child {
            collect(elem, local_name, out);
        }
    }
}

/// First node matching `local_name` in document order.
///
/// Zero matches is [`Error::UnexpectedResponse`]. Multiple matches are not
/// an error; the first wins.
pub fn first_node<'a>(root: &'a Element, local_name: &str) -> Result<&'a Element> {
    find_all(root, local_name)
        .into_iter()
        .next()
        .ok_or_else(|| Error::UnexpectedResponse {
            reason: format!("expected at least one node named {}", local_name),
        })
}

/// Text value of the first matching node. Required.
pub fn required_text(root: &Element, local_name: &str) -> Result<String> {
    Ok(text_of(first_node(root, local_name)?))
}

/// Text value of the first matching node, or `None` when no node matches.
pub fn optional_text(root: &Element, local_name: &str) -> Option<String> {
    find_all(root, local_name).into_iter().next().map(text_of)
}

/// Attribute value of a node. A missing attribute is a protocol violation.
pub fn required_attr(node: &Element, attr: &str) -> Result<String> {
    node.attributes
        .get(attr)
        .cloned()
        .ok_or_else(|| Error::UnexpectedResponse {
            reason: format!("node {} has no attribute {}", node.name, attr),
        })
}

/// Coerce a scalar to an integer.
pub fn integer(value: &str, context: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::UnexpectedResponse {
            reason: format!("field {} is not an integer: {:?}", context, value),
        })
}

/// Coerce the first four characters of a date scalar (`YYYYMMDD`) to a year.
pub fn year_prefix(value: &str, context: &str) -> Result<i32> {
    let trimmed = value.trim();
    let prefix = trimmed.get(..4).ok_or_else(|| Error::UnexpectedResponse {
        reason: format!("field {} is too short for a year prefix: {:?}", context, value),
    })?;
    prefix.parse().map_err(|_| Error::UnexpectedResponse {
        reason: format!("field {} does not start with a year: {:?}", context, value),
    })
}

/// Concatenated text content of a node, empty when it has none.
fn text_of(node: &Element) -> String {
    node.get_text().map(|t| t.into_owned()).unwrap_or_default()
}
