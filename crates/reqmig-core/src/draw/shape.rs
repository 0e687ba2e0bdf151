//! Resolved diagram shapes and their SVG primitives.

use svg::node::element as svg_element;

use super::ShapeStyle;
use crate::{
    apply_stroke,
    geometry::{Bounds, Point, Size},
};

/// A shape resolved from a diagram command document.
///
/// All coordinates are absolute: the cumulative translation that was in
/// effect when the shape was emitted has already been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle anchored at its top-left corner.
    Rect { origin: Point, size: Size },
    /// Ellipse given by its center and its horizontal/vertical radii.
    Ellipse { center: Point, radii: Size },
    /// Closed polygon through the given vertices.
    Polygon { points: Vec<Point> },
}

impl Shape {
    /// Creates a rectangle from its top-left corner and dimensions.
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::Rect {
            origin: Point::new(x, y),
            size: Size::new(w, h),
        }
    }

    /// Creates an ellipse from its center and radii.
    pub fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32) -> Self {
        Self::Ellipse {
            center: Point::new(cx, cy),
            radii: Size::new(rx, ry),
        }
    }

    /// Creates a polygon from its vertices.
    pub fn polygon(points: Vec<Point>) -> Self {
        Self::Polygon { points }
    }

    /// Returns the bounding box of this shape, or `None` for a polygon
    /// without vertices.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Rect { origin, size } => Some(origin.to_bounds(*size)),
            Self::Ellipse { center, radii } => Some(
                Point::new(center.x() - radii.width(), center.y() - radii.height())
                    .to_bounds(Size::new(radii.width() * 2.0, radii.height() * 2.0)),
            ),
            Self::Polygon { points } => Bounds::enclosing(points.iter().copied()),
        }
    }

    /// Renders this shape to an SVG node element.
    pub fn render_to_svg(&self, style: &ShapeStyle) -> Box<dyn svg::Node> {
        let fill = style.fill().to_string();
        match self {
            Self::Rect { origin, size } => {
                let rect = svg_element::Rectangle::new()
                    .set("x", origin.x())
                    .set("y", origin.y())
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", fill);
                Box::new(apply_stroke!(rect, style.stroke()))
            }
            Self::Ellipse { center, radii } => {
                let ellipse = svg_element::Ellipse::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("rx", radii.width())
                    .set("ry", radii.height())
                    .set("fill", fill);
                Box::new(apply_stroke!(ellipse, style.stroke()))
            }
            Self::Polygon { points } => {
                let points = points
                    .iter()
                    .map(|p| format!("{},{}", p.x(), p.y()))
                    .collect::<Vec<_>>()
                    .join(" ");
                let polygon = svg_element::Polygon::new()
                    .set("points", points)
                    .set("fill", fill);
                Box::new(apply_stroke!(polygon, style.stroke()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn render(shape: &Shape) -> String {
        shape.render_to_svg(&ShapeStyle::default()).to_string()
    }

    #[test]
    fn test_rect_svg() {
        let svg = render(&Shape::rect(10.0, 20.0, 30.0, 40.0));
        assert!(svg.starts_with("<rect"));
        assert!(svg.contains(r#"x="10""#));
        assert!(svg.contains(r#"y="20""#));
        assert!(svg.contains(r#"width="30""#));
        assert!(svg.contains(r#"height="40""#));
        assert!(svg.contains(r#"fill="white""#));
        assert!(svg.contains(r#"stroke="slategray""#));
        assert!(svg.contains(r#"stroke-width="2""#));
    }

    #[test]
    fn test_ellipse_svg() {
        let svg = render(&Shape::ellipse(50.0, 25.0, 10.0, 5.0));
        assert!(svg.starts_with("<ellipse"));
        assert!(svg.contains(r#"cx="50""#));
        assert!(svg.contains(r#"cy="25""#));
        assert!(svg.contains(r#"rx="10""#));
        assert!(svg.contains(r#"ry="5""#));
    }

    #[test]
    fn test_polygon_svg() {
        let svg = render(&Shape::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 7.5),
        ]));
        assert!(svg.starts_with("<polygon"));
        assert!(svg.contains(r#"points="0,0 10,0 5,7.5""#));
    }

    #[test]
    fn test_ellipse_bounds() {
        let bounds = Shape::ellipse(50.0, 25.0, 10.0, 5.0).bounds().unwrap();
        assert_approx_eq!(f32, bounds.min_x(), 40.0);
        assert_approx_eq!(f32, bounds.min_y(), 20.0);
        assert_approx_eq!(f32, bounds.max_x(), 60.0);
        assert_approx_eq!(f32, bounds.max_y(), 30.0);
    }

    #[test]
    fn test_empty_polygon_has_no_bounds() {
        assert!(Shape::polygon(Vec::new()).bounds().is_none());
    }
}
