//! Interpretation of drawing commands into resolved shapes.

use log::trace;

use reqmig_core::{
    draw::Shape,
    geometry::{Bounds, Point, Size},
};
use reqmig_parser::{Command, Element};

/// Shapes and canvas size resolved from one command document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagramDocument {
    width: Option<f32>,
    height: Option<f32>,
    shapes: Vec<Shape>,
}

impl DiagramDocument {
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Canvas size: the declared dimensions, falling back to the extent of
    /// the shapes measured from the origin.
    pub fn canvas_size(&self) -> Size {
        let extent = shape_bounds(&self.shapes).unwrap_or_default();

        Size::new(
            self.width.unwrap_or_else(|| extent.max_x().max(0.0)),
            self.height.unwrap_or_else(|| extent.max_y().max(0.0)),
        )
    }
}

/// Stack of cumulative offsets. The root entry is never popped.
#[derive(Debug)]
struct TransformState {
    stack: Vec<Point>,
}

impl TransformState {
    fn new() -> Self {
        Self {
            stack: vec![Point::default()],
        }
    }

    fn current(&self) -> Point {
        self.stack.last().copied().unwrap_or_default()
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        let next = self.current().add_point(Point::new(dx, dy));
        self.stack.push(next);
    }

    fn save(&mut self) {
        self.stack.push(self.current());
    }

    fn restore(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Applies the current offset to a document coordinate.
    fn place(&self, x: f32, y: f32) -> Point {
        Point::new(x, y).add_point(self.current())
    }
}

/// Interprets a parsed command document.
///
/// Every element is visited once as a group, in document order, and its
/// direct children are executed as one instruction stream. The offset stack
/// is shared by all groups. A path opened by `begin` collects the `move` and
/// `line` vertices that follow it in the same stream until `close`.
pub fn interpret(root: &Element) -> DiagramDocument {
    let mut state = TransformState::new();
    let mut shapes = Vec::new();

    for group in root.iter() {
        let mut path: Option<Vec<Point>> = None;

        for command in group.children().iter().filter_map(Command::from_element) {
            match command {
                Command::Width(_) | Command::Height(_) => {}
                Command::Translate { dx, dy } => state.translate(dx, dy),
                Command::Save => state.save(),
                Command::Restore => state.restore(),
                Command::Rect { x, y, w, h } => {
                    let origin = state.place(x, y);
                    shapes.push(Shape::rect(origin.x(), origin.y(), w, h));
                }
                Command::Ellipse { x, y, w, h } => {
                    let center = state.place(x + w / 2.0, y + h / 2.0);
                    shapes.push(Shape::ellipse(center.x(), center.y(), w / 2.0, h / 2.0));
                }
                Command::Begin => path = Some(Vec::new()),
                Command::Move { x, y } | Command::Line { x, y } => {
                    if let Some(points) = path.as_mut() {
                        points.push(state.place(x, y));
                    }
                }
                Command::Close => match path.take() {
                    Some(points) if points.len() >= 2 => shapes.push(Shape::polygon(points)),
                    Some(points) => {
                        trace!(vertices = points.len(); "Dropping degenerate path");
                    }
                    None => {}
                },
            }
        }

        if let Some(points) = path {
            trace!(group = group.name(), vertices = points.len(); "Discarding unclosed path");
        }
    }

    let (width, height) = canvas_dimensions(root);
    DiagramDocument {
        width,
        height,
        shapes,
    }
}

/// Last declared width and height anywhere in the document.
fn canvas_dimensions(root: &Element) -> (Option<f32>, Option<f32>) {
    root.iter()
        .filter_map(Command::from_element)
        .fold((None, None), |(width, height), command| match command {
            Command::Width(size) => (Some(size), height),
            Command::Height(size) => (width, Some(size)),
            _ => (width, height),
        })
}

/// Bounding box of all shapes, if any has one.
fn shape_bounds(shapes: &[Shape]) -> Option<Bounds> {
    shapes
        .iter()
        .filter_map(Shape::bounds)
        .reduce(|acc, bounds| acc.merge(&bounds))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn run(source: &str) -> DiagramDocument {
        interpret(&reqmig_parser::parse(source).unwrap())
    }

    #[test]
    fn test_rect_with_translation() {
        let doc = run(r#"<d><translate dx="10" dy="5"/><rect x="1" y="2" w="30" h="40"/></d>"#);
        assert_eq!(doc.shapes(), [Shape::rect(11.0, 7.0, 30.0, 40.0)]);
    }

    #[test]
    fn test_ellipse_center_and_radii() {
        let doc = run(r#"<d><translate dx="100"/><ellipse x="0" y="0" w="20" h="10"/></d>"#);
        assert_eq!(doc.shapes(), [Shape::ellipse(110.0, 5.0, 10.0, 5.0)]);
    }

    #[test]
    fn test_translations_accumulate() {
        let doc = run(
            r#"<d><translate dx="1" dy="1"/><translate dx="2" dy="3"/><rect w="1" h="1"/></d>"#,
        );
        assert_eq!(doc.shapes(), [Shape::rect(3.0, 4.0, 1.0, 1.0)]);
    }

    #[test]
    fn test_save_restore() {
        let doc = run(
            r#"<d>
                <save/>
                <translate dx="50" dy="50"/>
                <rect w="1" h="1"/>
                <restore/>
                <restore/>
                <rect w="1" h="1"/>
            </d>"#,
        );
        // The first restore pops the translation, the second pops the save.
        assert_eq!(
            doc.shapes(),
            [
                Shape::rect(50.0, 50.0, 1.0, 1.0),
                Shape::rect(0.0, 0.0, 1.0, 1.0)
            ]
        );
    }

    #[test]
    fn test_unmatched_restore_is_noop() {
        let doc = run(r#"<d><restore/><restore/><rect x="4" y="4" w="1" h="1"/></d>"#);
        assert_eq!(doc.shapes(), [Shape::rect(4.0, 4.0, 1.0, 1.0)]);
    }

    #[test]
    fn test_offset_stack_is_shared_across_groups() {
        let doc = run(
            r#"<d>
                <g><translate dx="10" dy="0"/></g>
                <g><rect w="1" h="1"/></g>
            </d>"#,
        );
        assert_eq!(doc.shapes(), [Shape::rect(10.0, 0.0, 1.0, 1.0)]);
    }

    #[test]
    fn test_path_from_sibling_stream() {
        let doc = run(
            r#"<d>
                <translate dx="1" dy="1"/>
                <begin/>
                <move x="0" y="0"/>
                <line x="10" y="0"/>
                <line x="5" y="5"/>
                <close/>
                <line x="99" y="99"/>
            </d>"#,
        );
        assert_eq!(
            doc.shapes(),
            [Shape::polygon(vec![
                Point::new(1.0, 1.0),
                Point::new(11.0, 1.0),
                Point::new(6.0, 6.0),
            ])]
        );
    }

    #[test]
    fn test_begin_children_are_not_vertices() {
        let doc = run(r#"<d><begin><move x="1" y="1"/><line x="2" y="2"/></begin><close/></d>"#);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_unclosed_and_degenerate_paths_are_dropped() {
        assert!(run(r#"<d><begin/><move x="1"/><line x="2"/></d>"#).is_empty());
        assert!(run(r#"<d><begin/><move x="1"/><close/></d>"#).is_empty());
        assert!(run(r#"<d><move x="1"/><line x="2"/><close/></d>"#).is_empty());
    }

    #[test]
    fn test_width_height_last_wins() {
        let doc = run(
            r#"<d>
                <width size="100"/>
                <g><width size="200"/><height size="80"/></g>
                <rect w="5" h="5"/>
            </d>"#,
        );
        assert_eq!(doc.width, Some(200.0));
        assert_eq!(doc.height, Some(80.0));

        let size = doc.canvas_size();
        assert_approx_eq!(f32, size.width(), 200.0);
        assert_approx_eq!(f32, size.height(), 80.0);
    }

    #[test]
    fn test_canvas_size_falls_back_to_extent() {
        let doc = run(r#"<d><rect x="10" y="20" w="30" h="40"/><ellipse x="0" y="0" w="100" h="2"/></d>"#);
        let size = doc.canvas_size();
        assert_approx_eq!(f32, size.width(), 100.0);
        assert_approx_eq!(f32, size.height(), 60.0);
    }

    #[test]
    fn test_no_drawing_commands() {
        let doc = run(r#"<d><width size="10"/><unknown/><translate dx="3"/></d>"#);
        assert!(doc.is_empty());
    }
}
