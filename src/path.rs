//! Path data builder
//!
//! Accumulates an SVG path `d` attribute string. Every coordinate is absolute
//! and only the `M`, `L`, `Q`, `C` and `Z` commands are emitted.
//!
//! Methods ending in `_to` neither close the path nor start a subpath (apart
//! from `move_to` itself). The shape helpers (`rect`, `round_rect`, `polygon`,
//! `circle`) start their own subpath and close it.
//!
//! # Example
//!
//! ```rust
//! use svg_utils::PathData;
//!
//! let mut path = PathData::new();
//! path.move_to(50.0, 50.0)?
//!     .line_to(&[100.0, 100.0, 150.0, 75.0])?
//!     .close_path();
//! assert_eq!(path.reset(), "M50,50L100,100,150,75Z");
//! # Ok::<(), svg_utils::SvgError>(())
//! ```

use std::f64::consts::TAU;
use std::fmt;

use crate::error::{Result, SvgError};
use crate::geometry::{format_number, format_number_with_precision, Point};

/// Mutable accumulator for path `d` strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathData {
    buffer: String,
    precision: Option<usize>,
}

impl PathData {
    /// Create an empty builder with exact number formatting
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder that rounds coordinates to `precision` decimals
    pub fn with_precision(precision: usize) -> Self {
        Self {
            buffer: String::new(),
            precision: Some(precision),
        }
    }

    /// The path accumulated so far
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Start a new subpath at `(x, y)`
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<&mut Self> {
        self.append("move_to", 'M', &[x, y])
    }

    /// Draw straight lines through a flat list of `x, y` pairs
    ///
    /// A trailing unpaired value is ignored.
    pub fn line_to(&mut self, coords: &[f64]) -> Result<&mut Self> {
        let pairs = even_prefix(coords);
        if pairs.is_empty() {
            return Err(SvgError::invalid(
                "line_to",
                "expected at least one x, y pair",
            ));
        }
        self.append("line_to", 'L', pairs)
    }

    /// Quadratic Bézier curve through control point `(cx, cy)` to `(x, y)`
    pub fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> Result<&mut Self> {
        self.append("quadratic_curve_to", 'Q', &[cx, cy, x, y])
    }

    /// Cubic Bézier curve with two control points, ending at `(x, y)`
    pub fn bezier_curve_to(
        &mut self,
        cx1: f64,
        cy1: f64,
        cx2: f64,
        cy2: f64,
        x: f64,
        y: f64,
    ) -> Result<&mut Self> {
        self.append("bezier_curve_to", 'C', &[cx1, cy1, cx2, cy2, x, y])
    }

    /// Close the current subpath
    pub fn close_path(&mut self) -> &mut Self {
        tracing::trace!("append Z");
        self.buffer.push('Z');
        self
    }

    /// Closed rectangle with top-left corner at `(x, y)`
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<&mut Self> {
        check_all("rect", &[x, y, width, height])?;
        let (right, bottom) = (x + width, y + height);
        self.move_to(x, y)?;
        self.line_to(&[right, y, right, bottom, x, bottom])?;
        Ok(self.close_path())
    }

    /// Closed rectangle whose corners are rounded with quadratic curves
    ///
    /// The radius is clamped to half of the shorter side.
    pub fn round_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> Result<&mut Self> {
        check_all("round_rect", &[x, y, width, height, radius])?;
        let r = radius.min(width.min(height) / 2.0);
        let (right, bottom) = (x + width, y + height);

        self.move_to(x + r, y)?;
        self.line_to(&[right - r, y])?
            .quadratic_curve_to(right, y, right, y + r)?;
        self.line_to(&[right, bottom - r])?
            .quadratic_curve_to(right, bottom, right - r, bottom)?;
        self.line_to(&[x + r, bottom])?
            .quadratic_curve_to(x, bottom, x, bottom - r)?;
        self.line_to(&[x, y + r])?
            .quadratic_curve_to(x, y, x + r, y)?;
        Ok(self.close_path())
    }

    /// Closed polygon through a flat list of `x, y` pairs
    ///
    /// Needs at least two points; a trailing unpaired value is ignored.
    pub fn polygon(&mut self, coords: &[f64]) -> Result<&mut Self> {
        let points = even_prefix(coords);
        if points.len() < 4 {
            return Err(SvgError::invalid(
                "polygon",
                format!("expected at least two x, y pairs, got {} values", coords.len()),
            ));
        }
        check_all("polygon", points)?;
        self.move_to(points[0], points[1])?;
        self.line_to(&points[2..])?;
        Ok(self.close_path())
    }

    /// Closed regular polygon approximating a circle with `detail` vertices
    ///
    /// The first vertex sits at angle zero, `(x + radius, y)`.
    pub fn circle(&mut self, x: f64, y: f64, radius: f64, detail: u32) -> Result<&mut Self> {
        check_all("circle", &[x, y, radius])?;
        if detail < 3 {
            return Err(SvgError::invalid(
                "circle",
                format!("detail must be at least 3, got {}", detail),
            ));
        }

        let center = Point::new(x, y);
        let step = TAU / f64::from(detail);
        let start = Point::on_circle(center, radius, 0.0);
        self.move_to(start.x, start.y)?;
        for i in 1..detail {
            let vertex = Point::on_circle(center, radius, step * f64::from(i));
            self.line_to(&[vertex.x, vertex.y])?;
        }
        Ok(self.close_path())
    }

    /// Take the accumulated path, leaving the builder empty
    pub fn reset(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    fn append(&mut self, method: &'static str, command: char, values: &[f64]) -> Result<&mut Self> {
        check_all(method, values)?;

        let joined = values
            .iter()
            .map(|v| self.format(*v))
            .collect::<Vec<_>>()
            .join(",");
        tracing::trace!("append {}{}", command, joined);

        self.buffer.push(command);
        self.buffer.push_str(&joined);
        Ok(self)
    }

    fn format(&self, value: f64) -> String {
        match self.precision {
            Some(precision) => format_number_with_precision(value, precision),
            None => format_number(value),
        }
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}

fn even_prefix(coords: &[f64]) -> &[f64] {
    &coords[..coords.len() - coords.len() % 2]
}

fn check_all(method: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SvgError::invalid(
            method,
            format!(
                "argument {} must be a finite number, got {}",
                index + 1,
                values[index]
            ),
        )),
        None => Ok(()),
    }
}
