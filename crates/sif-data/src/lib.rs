//! # sif-data
//!
//! Owned, read-only tree of a Synfig canvas document.
//!
//! Parsing the XML text is left to the caller; this crate only holds the
//! already-parsed structure and offers typed lookups over it. Trees can also
//! be assembled in code through the builder methods and the [`build`] helpers.

pub mod build;

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("<{parent}> has no <{tag}> child")]
    MissingChild { parent: String, tag: String },
    #[error("<{tag}> has no child at index {index}")]
    MissingIndex { tag: String, index: usize },
    #[error("<{tag}> is missing attribute `{name}`")]
    MissingAttribute { tag: String, name: String },
    #[error("<{tag}> has no text")]
    MissingText { tag: String },
    #[error("Invalid number in {context}: {value:?}")]
    InvalidNumber { context: String, value: String },
}

pub type Result<T> = std::result::Result<T, TreeError>;

/// An element of the document: tag, attributes in document order, optional
/// text and child elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Sets an attribute, replacing any previous value under the same name.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn require_attr(&self, name: &str) -> Result<&str> {
        self.attr(name).ok_or_else(|| TreeError::MissingAttribute {
            tag: self.tag.clone(),
            name: name.to_string(),
        })
    }

    pub fn attr_f64(&self, name: &str) -> Result<f64> {
        let raw = self.require_attr(name)?;
        parse_f64(raw, || format!("<{} {}>", self.tag, name))
    }

    pub fn text_f64(&self) -> Result<f64> {
        let raw = self.text().ok_or_else(|| TreeError::MissingText {
            tag: self.tag.clone(),
        })?;
        parse_f64(raw, || format!("<{}> text", self.tag))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn nth(&self, index: usize) -> Result<&Node> {
        self.children.get(index).ok_or_else(|| TreeError::MissingIndex {
            tag: self.tag.clone(),
            index,
        })
    }

    /// The value node wrapped by a parameter-like element (`<point>`, `<param>`, `<waypoint>`).
    pub fn first_child(&self) -> Result<&Node> {
        self.nth(0)
    }

    pub fn child(&self, tag: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.tag == tag)
    }

    pub fn require_child(&self, tag: &str) -> Result<&Node> {
        self.child(tag).ok_or_else(|| TreeError::MissingChild {
            parent: self.tag.clone(),
            tag: tag.to_string(),
        })
    }

    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// `<param name="...">` child lookup, as used by layers and canvases.
    pub fn param(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|c| c.tag == "param" && c.attr("name") == Some(name))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (k, v) in &self.attributes {
            write!(f, " {}=\"{}\"", k, v)?;
        }
        write!(f, ">")
    }
}

fn parse_f64(raw: &str, context: impl FnOnce() -> String) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| TreeError::InvalidNumber {
        context: context(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup() {
        let node = Node::new("real").with_attr("value", "2.5").with_attr("value", "3.5");
        assert_eq!(node.attr("value"), Some("3.5"));
        assert_eq!(node.attr_f64("value").unwrap(), 3.5);
        assert!(matches!(
            node.require_attr("guid"),
            Err(TreeError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_invalid_number_reports_context() {
        let node = Node::new("x").with_text("1,5");
        match node.text_f64() {
            Err(TreeError::InvalidNumber { context, value }) => {
                assert_eq!(context, "<x> text");
                assert_eq!(value, "1,5");
            }
            other => panic!("Expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_param_lookup() {
        let layer = Node::new("layer")
            .with_attr("type", "region")
            .with_child(Node::new("param").with_attr("name", "amount"))
            .with_child(Node::new("param").with_attr("name", "origin"));
        assert!(layer.param("origin").is_some());
        assert!(layer.param("bline").is_none());
        assert_eq!(layer.to_string(), "<layer type=\"region\">");
        assert!(matches!(layer.nth(5), Err(TreeError::MissingIndex { index: 5, .. })));
    }
}
