//! SVG Utils - helpers for building SVG fragments
//!
//! This library provides a chainable path data builder, gradient definitions,
//! namespaced element creation with bulk attribute/style setters, and
//! serialization to plain or base64 `data:` URIs.
//!
//! The host document is abstracted behind [`Document`]; [`SvgDocument`] is an
//! in-memory implementation that serializes to markup.
//!
//! # Example
//!
//! ```rust
//! use svg_utils::{create_ns, set_attribute, to_data_uri64, Document, PathData, SvgDocument};
//!
//! let mut path = PathData::new();
//! path.rect(10.0, 10.0, 20.0, 30.0)?;
//!
//! let mut doc = SvgDocument::new();
//! let svg = create_ns(&mut doc, "svg", Some(100.0), Some(100.0))?;
//! let shape = create_ns(&mut doc, "path", None, None)?;
//! set_attribute(&mut doc, shape, [("d", path.reset())])?;
//! doc.append_child(svg, shape)?;
//!
//! let uri = to_data_uri64(&doc, svg)?;
//! assert!(uri.starts_with("data:image/svg+xml;charset=utf-8;base64,"));
//! # Ok::<(), svg_utils::SvgError>(())
//! ```

pub mod dom;
pub mod element;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod path;

pub use dom::{ConfigError, Document, NodeId, SvgConfig, SvgDocument, SVG_NS};
pub use element::{create_ns, create_text, set_attribute, set_style};
pub use encode::{
    decode_base64, decode_data_uri, encode_base64, encode_html, markup_to_data_uri,
    markup_to_data_uri64, to_data_uri, to_data_uri64,
};
pub use error::{Result, SvgError};
pub use geometry::Point;
pub use gradient::{create_linear_gradient, create_radial_gradient};
pub use path::PathData;

/// Build the sample drawing: two open paths, curves, every shape helper,
/// both gradient kinds, an inline style and a text label
///
/// Returns the root `svg` element.
pub fn demo_drawing<D: Document>(doc: &mut D) -> Result<NodeId> {
    let mut path = PathData::new();
    path.move_to(50.0, 50.0)?
        .line_to(&[100.0, 100.0, 150.0, 75.0])?
        .move_to(250.0, 50.0)?
        .line_to(&[175.0, 50.0, 200.0, 175.0])?
        .quadratic_curve_to(300.0, 0.0, 250.0, 200.0)?
        .bezier_curve_to(0.0, 200.0, 200.0, 0.0, 50.0, 250.0)?
        .close_path()
        .rect(75.0, 75.0, 50.0, 50.0)?
        .round_rect(125.0, 125.0, 100.0, 100.0, 25.0)?
        .polygon(&[225.0, 225.0, 275.0, 225.0, 225.0, 275.0])?
        .circle(50.0, 250.0, 25.0, 8)?;
    let d = path.reset();

    let stops = ["0%", "50%", "100%"];
    let colors = ["magenta", "rgba(255, 255, 0, 0.1)", "lightblue"];
    let linear = create_linear_gradient(
        doc,
        "lineargradation",
        std::f64::consts::FRAC_PI_2,
        &stops,
        &colors,
    )?;
    let radial = create_radial_gradient(
        doc,
        "radialgradation",
        0.3,
        (0.5, 0.5),
        (0.7, 0.7),
        &stops,
        &colors,
        Some("reflect"),
    )?;

    let svg = create_ns(doc, "svg", Some(300.0), Some(300.0))?;
    doc.append_child(svg, linear)?;
    doc.append_child(svg, radial)?;
    set_attribute(
        doc,
        svg,
        [
            ("fill", "url(#radialgradation)"),
            ("stroke", "url(#lineargradation)"),
        ],
    )?;

    let shape = create_ns(doc, "path", None, None)?;
    set_attribute(doc, shape, [("stroke-width", "3"), ("d", d.as_str())])?;
    set_style(doc, shape, [("stroke-dasharray", "5, 2")])?;
    doc.append_child(svg, shape)?;

    let label = create_text(doc, "path drawing", 25.0, 25.0)?;
    doc.append_child(svg, label)?;

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_drawing_structure() {
        let mut doc = SvgDocument::new();
        let svg = demo_drawing(&mut doc).unwrap();
        let children = doc.children(svg);
        let tags: Vec<_> = children.iter().filter_map(|c| doc.tag_name(*c)).collect();
        assert_eq!(tags, vec!["defs", "defs", "path", "text"]);
        assert_eq!(doc.attribute(svg, "fill"), Some("url(#radialgradation)"));
    }

    #[test]
    fn test_demo_drawing_path() {
        let mut doc = SvgDocument::new();
        let svg = demo_drawing(&mut doc).unwrap();
        let path = doc.children(svg)[2];
        let d = doc.attribute(path, "d").unwrap();
        assert!(d.starts_with("M50,50L100,100,150,75M250,50L175,50,200,175Q300,0,250,200"));
        assert!(d.contains("C0,200,200,0,50,250ZM75,75L125,75,125,125,75,125Z"));
        assert!(d.contains("M225,225L275,225,225,275ZM75,250L"));
        assert!(d.ends_with('Z'));
    }

    #[test]
    fn test_demo_drawing_round_trips_through_data_uri() {
        let mut doc = SvgDocument::new();
        let svg = demo_drawing(&mut doc).unwrap();
        let markup = encode_html(&doc, svg).unwrap();
        let uri = to_data_uri64(&doc, svg).unwrap();
        assert_eq!(decode_data_uri(&uri).unwrap(), markup);
    }
}
