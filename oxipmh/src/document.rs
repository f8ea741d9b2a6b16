//! Neutral response-tree primitives
//!
//! The provider core assembles responses as a plain node tree; producing
//! XML text from it is the hosting application's job. [`Node`] supports the
//! three operations the handlers need: add a child, set an attribute, and
//! inject a raw (pre-escaped) fragment.
//!
//! A serializer walks [`Node::content`](Node::content) in order; attribute
//! and child order is insertion order throughout.

/// One piece of a node's ordered content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeContent {
    /// A child element
    Element(Node),
    /// Text to be escaped by the serializer
    Text(String),
    /// A raw XML fragment the serializer must emit verbatim
    Raw(String),
}

/// An element in the response tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    attributes: Vec<(String, String)>,
    content: Vec<NodeContent>,
}

impl Node {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Create an element with text content
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut node = Self::new(name);
        node.add_text(text);
        node
    }

    /// Element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set an attribute, replacing any existing value for the same name
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in insertion order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Append a child element and return a mutable reference to it
    pub fn add_child(&mut self, child: Node) -> &mut Node {
        self.content.push(NodeContent::Element(child));
        match self.content.last_mut() {
            Some(NodeContent::Element(node)) => node,
            _ => unreachable!("just pushed an element"),
        }
    }

    /// Append text content
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.content.push(NodeContent::Text(text.into()));
    }

    /// Append a raw XML fragment
    pub fn add_raw(&mut self, fragment: impl Into<String>) {
        self.content.push(NodeContent::Raw(fragment.into()));
    }

    /// Ordered content, for serializers
    pub fn content(&self) -> &[NodeContent] {
        &self.content
    }

    /// Child elements in order
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.content.iter().filter_map(|c| match c {
            NodeContent::Element(node) => Some(node),
            _ => None,
        })
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().find(|c| c.name == name)
    }

    /// Mutable reference to the first child element with the given name
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.content.iter_mut().find_map(|c| match c {
            NodeContent::Element(node) if node.name == name => Some(node),
            _ => None,
        })
    }

    /// All child elements with the given name, in order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children().filter(move |c| c.name == name)
    }

    /// Concatenated text content (raw fragments excluded)
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                NodeContent::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
