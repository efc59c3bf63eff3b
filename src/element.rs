//! Element factory: namespaced creation and bulk attribute/style setters

use std::fmt::Display;

use crate::dom::{Document, NodeId, SVG_NS};
use crate::error::{ensure_finite, Result, SvgError};
use crate::geometry::format_number;

/// Create an element in the SVG namespace
///
/// For the root `svg` element (any letter case) the namespace declaration is
/// written as an attribute, followed by `width`/`height` when given.
///
/// # Example
///
/// ```rust
/// use svg_utils::{create_ns, encode_html, SvgDocument};
///
/// let mut doc = SvgDocument::new();
/// let svg = create_ns(&mut doc, "svg", Some(300.0), Some(150.0))?;
/// assert_eq!(
///     encode_html(&doc, svg)?,
///     r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="150"/>"#
/// );
/// # Ok::<(), svg_utils::SvgError>(())
/// ```
pub fn create_ns<D: Document>(
    doc: &mut D,
    tag: &str,
    width: Option<f64>,
    height: Option<f64>,
) -> Result<NodeId> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(SvgError::invalid("create_ns", "tag name is required"));
    }

    let is_root = tag.eq_ignore_ascii_case("svg");
    // Validate before creating anything
    let width = width
        .filter(|_| is_root)
        .map(|w| ensure_finite("create_ns", "width", w))
        .transpose()?;
    let height = height
        .filter(|_| is_root)
        .map(|h| ensure_finite("create_ns", "height", h))
        .transpose()?;

    let node = doc.create_element_ns(SVG_NS, tag)?;
    if is_root {
        doc.set_attribute(node, "xmlns", SVG_NS)?;
        if let Some(w) = width {
            doc.set_attribute(node, "width", &format_number(w))?;
        }
        if let Some(h) = height {
            doc.set_attribute(node, "height", &format_number(h))?;
        }
    }
    Ok(node)
}

/// Set every attribute in `attributes` on `node`, in iteration order
pub fn set_attribute<D, I, K, V>(doc: &mut D, node: NodeId, attributes: I) -> Result<()>
where
    D: Document,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    for (key, value) in attributes {
        doc.set_attribute(node, key.as_ref(), &value.to_string())?;
    }
    Ok(())
}

/// Set every inline style property in `styles` on `node`, in iteration order
pub fn set_style<D, I, K, V>(doc: &mut D, node: NodeId, styles: I) -> Result<()>
where
    D: Document,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    for (property, value) in styles {
        doc.set_style(node, property.as_ref(), &value.to_string())?;
    }
    Ok(())
}

/// Create a `text` element at `(x, y)` holding `content`
pub fn create_text<D: Document>(doc: &mut D, content: &str, x: f64, y: f64) -> Result<NodeId> {
    let x = ensure_finite("create_text", "x", x)?;
    let y = ensure_finite("create_text", "y", y)?;

    let text = create_ns(doc, "text", None, None)?;
    doc.set_attribute(text, "x", &format_number(x))?;
    doc.set_attribute(text, "y", &format_number(y))?;
    doc.append_text(text, content)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::SvgDocument;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_root_svg() {
        let mut doc = SvgDocument::new();
        let svg = create_ns(&mut doc, "SVG", Some(300.0), None).unwrap();
        assert_eq!(doc.attribute(svg, "xmlns"), Some(SVG_NS));
        assert_eq!(doc.attribute(svg, "width"), Some("300"));
        assert_eq!(doc.attribute(svg, "height"), None);
    }

    #[test]
    fn test_dimensions_ignored_for_other_tags() {
        let mut doc = SvgDocument::new();
        let path = create_ns(&mut doc, "path", Some(10.0), Some(10.0)).unwrap();
        assert_eq!(doc.serialize(path).unwrap(), "<path/>");
        assert_eq!(doc.namespace(path), Some(SVG_NS));
    }

    #[test]
    fn test_missing_tag() {
        let mut doc = SvgDocument::new();
        let err = create_ns(&mut doc, "  ", None, None).unwrap_err();
        assert_eq!(err.method(), "create_ns");
        assert_eq!(doc.node_count(), 0);
    }

    #[test]
    fn test_non_finite_dimension_creates_nothing() {
        let mut doc = SvgDocument::new();
        assert!(create_ns(&mut doc, "svg", Some(f64::NAN), None).is_err());
        assert_eq!(doc.node_count(), 0);
    }

    #[test]
    fn test_set_attribute_mixed_values() {
        let mut doc = SvgDocument::new();
        let path = create_ns(&mut doc, "path", None, None).unwrap();
        set_attribute(&mut doc, path, [("stroke-width", "3"), ("d", "M0,0Z")]).unwrap();
        set_attribute(&mut doc, path, vec![("opacity", 0.5)]).unwrap();
        assert_eq!(
            doc.serialize(path).unwrap(),
            r#"<path stroke-width="3" d="M0,0Z" opacity="0.5"/>"#
        );
    }

    #[test]
    fn test_set_style() {
        let mut doc = SvgDocument::new();
        let path = create_ns(&mut doc, "path", None, None).unwrap();
        set_style(&mut doc, path, [("stroke-dasharray", "5, 2")]).unwrap();
        assert_eq!(
            doc.serialize(path).unwrap(),
            r#"<path style="stroke-dasharray: 5, 2;"/>"#
        );
    }

    #[test]
    fn test_set_attribute_unknown_node() {
        let mut doc = SvgDocument::new();
        let own = create_ns(&mut doc, "g", None, None).unwrap();
        let mut other = SvgDocument::new();
        let foreign = create_ns(&mut other, "g", None, None).unwrap();

        let err = set_attribute(&mut doc, foreign, [("fill", "red")]).unwrap_err();
        assert_eq!(err.method(), "set_attribute");
        assert_eq!(doc.serialize(own).unwrap(), "<g/>");
        assert_eq!(other.serialize(foreign).unwrap(), "<g/>");
    }

    #[test]
    fn test_create_text() {
        let mut doc = SvgDocument::new();
        let text = create_text(&mut doc, "path drawing", 25.0, 25.0).unwrap();
        assert_eq!(
            doc.serialize(text).unwrap(),
            r#"<text x="25" y="25">path drawing</text>"#
        );
    }
}
