//! Gradient definitions
//!
//! Each call builds a fresh `defs` wrapper holding one gradient element and
//! its `stop` children. Append the returned node to an `svg` element and
//! reference the gradient as `url(#id)` from `fill` or `stroke`.

use crate::dom::{Document, NodeId};
use crate::element::{create_ns, set_attribute};
use crate::error::{ensure_finite, Result, SvgError};
use crate::geometry::{format_number, Point};

/// Spread method used when none is given
pub const DEFAULT_SPREAD_METHOD: &str = "pad";

/// Create a linear gradient running from `(0, 0)` towards `angle` radians
///
/// The vector ends at `(cos(angle), sin(angle))` in the bounding-box space of
/// the element using it. Offsets and colors are paired by position and are
/// not checked for monotonicity.
///
/// # Example
///
/// ```rust
/// use svg_utils::{create_linear_gradient, encode_html, SvgDocument};
///
/// let mut doc = SvgDocument::new();
/// let defs = create_linear_gradient(&mut doc, "fade", 0.0, &["0%", "100%"], &["red", "blue"])?;
/// let markup = encode_html(&doc, defs)?;
/// assert!(markup.starts_with(r#"<defs><linearGradient id="fade" x1="0" y1="0" x2="1" y2="0">"#));
/// # Ok::<(), svg_utils::SvgError>(())
/// ```
pub fn create_linear_gradient<D, S, C>(
    doc: &mut D,
    id: &str,
    angle: f64,
    stops: &[S],
    colors: &[C],
) -> Result<NodeId>
where
    D: Document,
    S: AsRef<str>,
    C: AsRef<str>,
{
    const METHOD: &str = "create_linear_gradient";
    check_id(METHOD, id)?;
    let angle = ensure_finite(METHOD, "angle", angle)?;
    check_stops(METHOD, stops, colors)?;

    let end = Point::on_circle(Point::default(), 1.0, angle);
    tracing::debug!(id, angle, stops = stops.len(), "building linear gradient");

    let defs = create_ns(doc, "defs", None, None)?;
    let gradient = create_ns(doc, "linearGradient", None, None)?;
    set_attribute(
        doc,
        gradient,
        [
            ("id", id.to_string()),
            ("x1", format_number(0.0)),
            ("y1", format_number(0.0)),
            ("x2", format_number(end.x)),
            ("y2", format_number(end.y)),
        ],
    )?;
    append_stops(doc, gradient, stops, colors)?;
    doc.append_child(defs, gradient)?;
    Ok(defs)
}

/// Create a radial gradient centered on `origin` with focal point `focus`
///
/// `origin` and `focus` take a [`Point`] or an `(x, y)` tuple. `spread` is
/// written verbatim to `spreadMethod` (`pad`, `reflect` or
/// `repeat`); `None` means `pad`.
#[allow(clippy::too_many_arguments)]
pub fn create_radial_gradient<D, S, C>(
    doc: &mut D,
    id: &str,
    radius: f64,
    origin: impl Into<Point>,
    focus: impl Into<Point>,
    stops: &[S],
    colors: &[C],
    spread: Option<&str>,
) -> Result<NodeId>
where
    D: Document,
    S: AsRef<str>,
    C: AsRef<str>,
{
    const METHOD: &str = "create_radial_gradient";
    check_id(METHOD, id)?;
    let radius = ensure_finite(METHOD, "radius", radius)?;
    let (origin, focus) = (origin.into(), focus.into());
    let origin = Point::new(
        ensure_finite(METHOD, "origin x", origin.x)?,
        ensure_finite(METHOD, "origin y", origin.y)?,
    );
    let focus = Point::new(
        ensure_finite(METHOD, "focus x", focus.x)?,
        ensure_finite(METHOD, "focus y", focus.y)?,
    );
    check_stops(METHOD, stops, colors)?;
    let spread = spread.unwrap_or(DEFAULT_SPREAD_METHOD);
    tracing::debug!(id, radius, spread, stops = stops.len(), "building radial gradient");

    let defs = create_ns(doc, "defs", None, None)?;
    let gradient = create_ns(doc, "radialGradient", None, None)?;
    set_attribute(
        doc,
        gradient,
        [
            ("id", id.to_string()),
            ("cx", format_number(origin.x)),
            ("cy", format_number(origin.y)),
            ("r", format_number(radius)),
            ("fx", format_number(focus.x)),
            ("fy", format_number(focus.y)),
            ("spreadMethod", spread.to_string()),
        ],
    )?;
    append_stops(doc, gradient, stops, colors)?;
    doc.append_child(defs, gradient)?;
    Ok(defs)
}

fn check_id(method: &'static str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(SvgError::invalid(method, "gradient id is required"));
    }
    Ok(())
}

fn check_stops<S: AsRef<str>, C: AsRef<str>>(
    method: &'static str,
    stops: &[S],
    colors: &[C],
) -> Result<()> {
    if stops.is_empty() {
        return Err(SvgError::invalid(method, "at least one stop is required"));
    }
    if stops.len() != colors.len() {
        return Err(SvgError::invalid(
            method,
            format!(
                "{} stops but {} colors; each stop needs exactly one color",
                stops.len(),
                colors.len()
            ),
        ));
    }
    Ok(())
}

fn append_stops<D, S, C>(doc: &mut D, gradient: NodeId, stops: &[S], colors: &[C]) -> Result<()>
where
    D: Document,
    S: AsRef<str>,
    C: AsRef<str>,
{
    for (offset, color) in stops.iter().zip(colors) {
        let stop = create_ns(doc, "stop", None, None)?;
        set_attribute(
            doc,
            stop,
            [("offset", offset.as_ref()), ("stop-color", color.as_ref())],
        )?;
        doc.append_child(gradient, stop)?;
    }
    Ok(())
}
