//! Host document abstraction
//!
//! Element creation, attribute mutation and serialization are capabilities of
//! whatever document hosts the markup. The helpers in this crate only talk to
//! the [`Document`] trait; [`SvgDocument`] is the in-memory implementation.

pub mod config;
pub mod tree;

pub use config::{ConfigError, SvgConfig};
pub use tree::SvgDocument;

use crate::error::Result;

/// Namespace URI for SVG elements
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Opaque handle to a node owned by a [`Document`]
///
/// A handle carries the identity of the document that issued it, so it is
/// rejected by any other document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) document: u64,
    pub(crate) index: usize,
}

/// Minimal set of DOM operations the helpers need
pub trait Document {
    /// Create a detached element `tag` in namespace `ns`
    fn create_element_ns(&mut self, ns: &str, tag: &str) -> Result<NodeId>;

    /// Set (or replace) an attribute
    fn set_attribute(&mut self, node: NodeId, key: &str, value: &str) -> Result<()>;

    /// Set (or replace) an inline style property
    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<()>;

    /// Append `child` as the last child of `parent`, detaching it from any previous parent
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Append character data to `node`
    fn append_text(&mut self, node: NodeId, text: &str) -> Result<()>;

    /// Outer markup of `node` and its subtree
    fn serialize(&self, node: NodeId) -> Result<String>;
}
