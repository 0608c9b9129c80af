//! Append-only XML document tree and serializer.
//!
//! Nodes live in an arena indexed by [`NodeId`]; elements are appended and
//! never removed or reordered, which keeps rendering deterministic: attributes
//! and children serialize in insertion order. Output uses a fixed 4-space
//! indent and UTF-8, matching what the target server's tooling emits.

use std::fs;
use std::io;
use std::path::Path;

/// Handle to a node inside one [`XmlDocument`]'s arena.
///
/// Ids are only meaningful for the document that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
struct XmlNode {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<NodeId>,
    text: Option<String>,
}

/// An in-memory XML tree with exactly one root element.
#[derive(Debug)]
pub struct XmlDocument {
    nodes: Vec<XmlNode>,
    root: NodeId,
}

impl XmlDocument {
    /// Create a document whose root element is `root_tag`.
    pub fn new(root_tag: &str) -> Self {
        let root_node = XmlNode {
            tag: root_tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        };
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a new child element under `parent` and return its id.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(XmlNode {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Set an attribute on `node`, replacing any previous value for `name`
    /// while keeping its original position.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let attrs = &mut self.nodes[node.0].attributes;
        if let Some(existing) = attrs.iter_mut().find(|(n, _)| n == name) {
            existing.1 = value.to_string();
        } else {
            attrs.push((name.to_string(), value.to_string()));
        }
    }

    /// Set the text content of `node`. Text and child elements are mutually
    /// exclusive in the documents this crate builds.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = Some(text.to_string());
    }

    /// Render the document to a string with an XML declaration and 4-space
    /// indentation.
    pub fn render(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.render_node(self.root, 0, &mut out);
        out
    }

    /// Render the document and write it to `path`.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.render())
    }

    fn render_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = &self.nodes[id.0];
        let indent = "    ".repeat(depth);

        out.push_str(&indent);
        out.push('<');
        out.push_str(&node.tag);
        for (name, value) in &node.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }

        if let Some(text) = &node.text {
            out.push('>');
            out.push_str(&escape(text));
            out.push_str("</");
            out.push_str(&node.tag);
            out.push_str(">\n");
        } else if node.children.is_empty() {
            out.push_str("/>\n");
        } else {
            out.push_str(">\n");
            for child in &node.children {
                self.render_node(*child, depth + 1, out);
            }
            out.push_str(&indent);
            out.push_str("</");
            out.push_str(&node.tag);
            out.push_str(">\n");
        }
    }
}

/// Escape text for use in XML attribute values and element content.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
