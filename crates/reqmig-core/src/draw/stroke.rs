//! Stroke definitions.
//!
//! - [`StrokeDefinition`]: stroke color and width
//! - [`apply_stroke!`](crate::apply_stroke!): Macro for applying stroke attributes to SVG elements
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"slategray"`, `1` |
//! | `width` | `stroke-width` | `2` |

use crate::color::Color;

/// A stroke definition for rendering shape outlines.
///
/// # Examples
///
/// ```
/// use reqmig_core::draw::StrokeDefinition;
/// use reqmig_core::color::Color;
///
/// let stroke = StrokeDefinition::new(Color::new("slategray").unwrap(), 2.0);
/// assert_eq!(stroke.width(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// # Examples
///
/// ```
/// use reqmig_core::draw::StrokeDefinition;
/// use reqmig_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 2.0);
/// let rect = svg_element::Rectangle::new()
///     .set("x", 0)
///     .set("y", 0)
///     .set("width", 100)
///     .set("height", 50);
///
/// let rect = reqmig_core::apply_stroke!(rect, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_accessors() {
        let stroke = StrokeDefinition::new(Color::shape_outline(), 2.5);
        assert_eq!(stroke.width(), 2.5);
        assert_eq!(stroke.color().to_string(), "slategray");
    }
}
