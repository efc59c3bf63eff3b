//! In-memory document tree

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, SvgError};

use super::{Document, NodeId, SvgConfig, SVG_NS};

/// Source of per-document identities stamped into every issued [`NodeId`]
static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone)]
enum Child {
    Element(NodeId),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    namespace: String,
    tag: String,
    /// Attributes in first-insertion order; `style` mirrors `styles`
    attributes: Vec<(String, String)>,
    /// Inline style declarations in first-insertion order
    styles: Vec<(String, String)>,
    children: Vec<Child>,
    parent: Option<NodeId>,
}

/// Arena-backed [`Document`] that serializes to SVG/XML markup
///
/// Nodes live as long as the document. Detached nodes are kept and can be
/// appended later. A clone shares the identity of its source, so handles
/// issued before cloning address the same nodes in both.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    id: u64,
    config: SvgConfig,
    nodes: Vec<Node>,
}

impl Default for SvgDocument {
    fn default() -> Self {
        Self::with_config(SvgConfig::default())
    }
}

impl SvgDocument {
    /// Create an empty document with default serialization
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with custom serialization
    pub fn with_config(config: SvgConfig) -> Self {
        Self {
            id: NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed),
            config,
            nodes: vec![],
        }
    }

    pub fn config(&self) -> &SvgConfig {
        &self.config
    }

    /// Number of nodes ever created in this document
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Local name of an element
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.lookup(node).map(|n| n.tag.as_str())
    }

    /// Namespace URI of an element
    pub fn namespace(&self, node: NodeId) -> Option<&str> {
        self.lookup(node).map(|n| n.namespace.as_str())
    }

    /// Value of an attribute, if set
    pub fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        self.lookup(node).and_then(|n| {
            n.attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        })
    }

    /// Value of an inline style property, if set
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.lookup(node).and_then(|n| {
            n.styles
                .iter()
                .find(|(p, _)| p == property)
                .map(|(_, v)| v.as_str())
        })
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.lookup(node).and_then(|n| n.parent)
    }

    /// Element children in document order
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.lookup(node)
            .map(|n| {
                n.children
                    .iter()
                    .filter_map(|c| match c {
                        Child::Element(id) => Some(*id),
                        Child::Text(_) => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Concatenated character data of the subtree
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        if let Some(n) = self.lookup(node) {
            for child in &n.children {
                match child {
                    Child::Text(t) => text.push_str(t),
                    Child::Element(id) => text.push_str(&self.text_content(*id)),
                }
            }
        }
        text
    }

    fn lookup(&self, node: NodeId) -> Option<&Node> {
        if node.document == self.id {
            self.nodes.get(node.index)
        } else {
            None
        }
    }

    fn node(&self, method: &'static str, node: NodeId) -> Result<&Node> {
        self.lookup(node)
            .ok_or_else(|| unknown_node(method, self.id, node))
    }

    fn node_mut(&mut self, method: &'static str, node: NodeId) -> Result<&mut Node> {
        let id = self.id;
        let found = if node.document == id {
            self.nodes.get_mut(node.index)
        } else {
            None
        };
        found.ok_or_else(|| unknown_node(method, id, node))
    }

    fn upsert_attribute(node: &mut Node, key: &str, value: String) {
        match node.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => node.attributes.push((key.to_string(), value)),
        }
    }

    fn write_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = &self.nodes[id.index];

        out.push('<');
        out.push_str(&node.tag);

        let declares_ns = node.attributes.iter().any(|(k, _)| k == "xmlns");
        let inherits_ns = node
            .parent
            .map(|p| self.nodes[p.index].namespace == node.namespace)
            .unwrap_or(node.namespace == SVG_NS);
        if !declares_ns && !inherits_ns {
            out.push_str(&format!(r#" xmlns="{}""#, escape_xml(&node.namespace)));
        }

        for (key, value) in &node.attributes {
            out.push_str(&format!(r#" {}="{}""#, key, escape_xml(value)));
        }

        if node.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');

        let only_elements = node
            .children
            .iter()
            .all(|c| matches!(c, Child::Element(_)));
        let pretty = self.config.pretty_print && only_elements;

        for child in &node.children {
            match child {
                Child::Element(child_id) => {
                    if pretty {
                        out.push('\n');
                        out.push_str(&"  ".repeat(depth + 1));
                    }
                    self.write_node(*child_id, depth + 1, out);
                }
                Child::Text(text) => out.push_str(&escape_xml(text)),
            }
        }

        if pretty {
            out.push('\n');
            out.push_str(&"  ".repeat(depth));
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }
}

impl Document for SvgDocument {
    fn create_element_ns(&mut self, ns: &str, tag: &str) -> Result<NodeId> {
        check_name("create_element_ns", "tag", tag)?;
        if ns.is_empty() {
            return Err(SvgError::invalid(
                "create_element_ns",
                "namespace must not be empty",
            ));
        }

        let id = NodeId {
            document: self.id,
            index: self.nodes.len(),
        };
        self.nodes.push(Node {
            namespace: ns.to_string(),
            tag: tag.to_string(),
            attributes: vec![],
            styles: vec![],
            children: vec![],
            parent: None,
        });
        tracing::debug!(?id, tag, "created element");
        Ok(id)
    }

    fn set_attribute(&mut self, node: NodeId, key: &str, value: &str) -> Result<()> {
        check_name("set_attribute", "attribute name", key)?;
        let n = self.node_mut("set_attribute", node)?;
        if key == "style" {
            n.styles = parse_style(value);
            let formatted = format_style(&n.styles);
            Self::upsert_attribute(n, key, formatted);
        } else {
            Self::upsert_attribute(n, key, value.to_string());
        }
        Ok(())
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<()> {
        check_name("set_style", "property name", property)?;
        let n = self.node_mut("set_style", node)?;

        let value = value.trim().to_string();
        match n.styles.iter_mut().find(|(p, _)| p == property) {
            Some((_, existing)) => *existing = value,
            None => n.styles.push((property.to_string(), value)),
        }

        let formatted = format_style(&n.styles);
        Self::upsert_attribute(n, "style", formatted);
        Ok(())
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node("append_child", parent)?;
        self.node("append_child", child)?;

        // Reject cycles: the child may not be the parent or one of its ancestors
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(SvgError::invalid(
                    "append_child",
                    "a node cannot be appended to itself or its descendant",
                ));
            }
            cursor = self.nodes[current.index].parent;
        }

        if let Some(old_parent) = self.nodes[child.index].parent {
            self.nodes[old_parent.index]
                .children
                .retain(|c| !matches!(c, Child::Element(id) if *id == child));
        }
        self.nodes[child.index].parent = Some(parent);
        self.nodes[parent.index].children.push(Child::Element(child));
        Ok(())
    }

    fn append_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        let n = self.node_mut("append_text", node)?;
        if !text.is_empty() {
            n.children.push(Child::Text(text.to_string()));
        }
        Ok(())
    }

    fn serialize(&self, node: NodeId) -> Result<String> {
        let n = self.node("serialize", node)?;

        let mut out = String::new();
        if self.config.xml_declaration && n.parent.is_none() && n.tag.eq_ignore_ascii_case("svg") {
            out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            if self.config.pretty_print {
                out.push('\n');
            }
        }
        self.write_node(node, 0, &mut out);
        tracing::debug!(?node, len = out.len(), "serialized element");
        Ok(out)
    }
}

fn unknown_node(method: &'static str, document: u64, node: NodeId) -> SvgError {
    if node.document == document {
        SvgError::invalid(method, format!("unknown node {}", node.index))
    } else {
        SvgError::invalid(
            method,
            format!(
                "node {} belongs to document {}, not {}",
                node.index, node.document, document
            ),
        )
    }
}

/// Names may not be empty or contain markup-breaking characters
fn check_name(method: &'static str, what: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SvgError::invalid(method, format!("{} must not be empty", what)));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=' | '&'))
    {
        return Err(SvgError::invalid(
            method,
            format!("{} '{}' contains invalid character {:?}", what, name, bad),
        ));
    }
    Ok(())
}

/// Split a `style` attribute into declarations
///
/// Semicolons inside quotes or parentheses belong to the value, so
/// `url("data:image/png;base64,…")` survives intact.
fn parse_style(style: &str) -> Vec<(String, String)> {
    let mut declarations = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut depth = 0usize;

    for ch in style.chars() {
        if escaped {
            escaped = false;
            current.push(ch);
            continue;
        }
        match (quote, ch) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                push_declaration(&mut declarations, &current);
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    push_declaration(&mut declarations, &current);
    declarations
}

fn push_declaration(declarations: &mut Vec<(String, String)>, text: &str) {
    let Some((property, value)) = text.split_once(':') else {
        return;
    };
    let property = property.trim();
    if property.is_empty() {
        return;
    }
    let value = value.trim().to_string();
    match declarations.iter_mut().find(|(p, _)| p == property) {
        Some((_, existing)) => *existing = value,
        None => declarations.push((property.to_string(), value)),
    }
}

fn format_style(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(p, v)| format!("{}: {};", p, v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
