//! Lowering of document elements to drawing commands.

use log::trace;

use crate::element::Element;

/// A drawing operation recognized in a command document.
///
/// Coordinates are as written in the document, before any translation is
/// applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Declares the canvas width.
    Width(f32),
    /// Declares the canvas height.
    Height(f32),
    /// Pushes the current offset moved by `(dx, dy)`.
    Translate { dx: f32, dy: f32 },
    /// Pushes a copy of the current offset.
    Save,
    /// Pops the offset stack.
    Restore,
    /// Rectangle anchored at its top-left corner.
    Rect { x: f32, y: f32, w: f32, h: f32 },
    /// Ellipse inscribed in the given box.
    Ellipse { x: f32, y: f32, w: f32, h: f32 },
    /// Starts collecting path vertices from the following siblings.
    Begin,
    /// Path vertex.
    Move { x: f32, y: f32 },
    /// Path vertex.
    Line { x: f32, y: f32 },
    /// Ends the current path.
    Close,
}

impl Command {
    /// Classifies an element by its case-insensitive local name.
    ///
    /// Returns `None` for unrecognized element kinds and for recognized
    /// ones carrying a non-numeric coordinate. Absent coordinates read as
    /// zero.
    pub fn from_element(element: &Element) -> Option<Self> {
        let kind = element.local_name().to_ascii_lowercase();
        let command = match kind.as_str() {
            "width" => Self::Width(number(element, "size")?),
            "height" => Self::Height(number(element, "size")?),
            "translate" => Self::Translate {
                dx: number(element, "dx")?,
                dy: number(element, "dy")?,
            },
            "save" => Self::Save,
            "restore" => Self::Restore,
            "rect" => Self::Rect {
                x: number(element, "x")?,
                y: number(element, "y")?,
                w: number(element, "w")?,
                h: number(element, "h")?,
            },
            "ellipse" => Self::Ellipse {
                x: number(element, "x")?,
                y: number(element, "y")?,
                w: number(element, "w")?,
                h: number(element, "h")?,
            },
            "begin" => Self::Begin,
            "move" => Self::Move {
                x: number(element, "x")?,
                y: number(element, "y")?,
            },
            "line" => Self::Line {
                x: number(element, "x")?,
                y: number(element, "y")?,
            },
            "close" => Self::Close,
            _ => return None,
        };
        Some(command)
    }
}

fn number(element: &Element, attribute: &str) -> Option<f32> {
    let Some(raw) = element.attribute(attribute) else {
        return Some(0.0);
    };

    let value = raw.trim().parse::<f32>().ok().filter(|v| v.is_finite());
    if value.is_none() {
        trace!(
            element = element.name(),
            attribute = attribute,
            value = raw;
            "Ignoring command with a non-numeric attribute"
        );
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn lower(source: &str) -> Option<Command> {
        Command::from_element(&parse(source).unwrap())
    }

    #[test]
    fn test_recognized_commands() {
        assert_eq!(lower(r#"<width size="200"/>"#), Some(Command::Width(200.0)));
        assert_eq!(lower(r#"<Height size=" 50 "/>"#), Some(Command::Height(50.0)));
        assert_eq!(
            lower(r#"<translate dx="5" dy="-2.5"/>"#),
            Some(Command::Translate { dx: 5.0, dy: -2.5 })
        );
        assert_eq!(lower("<save/>"), Some(Command::Save));
        assert_eq!(lower("<RESTORE/>"), Some(Command::Restore));
        assert_eq!(
            lower(r#"<dg:rect x="1" y="2" w="3" h="4"/>"#),
            Some(Command::Rect {
                x: 1.0,
                y: 2.0,
                w: 3.0,
                h: 4.0
            })
        );
        assert_eq!(
            lower(r#"<line x="7" y="8"/>"#),
            Some(Command::Line { x: 7.0, y: 8.0 })
        );
        assert_eq!(lower("<begin/>"), Some(Command::Begin));
        assert_eq!(lower("<close></close>"), Some(Command::Close));
    }

    #[test]
    fn test_missing_attributes_read_as_zero() {
        assert_eq!(
            lower(r#"<ellipse w="10"/>"#),
            Some(Command::Ellipse {
                x: 0.0,
                y: 0.0,
                w: 10.0,
                h: 0.0
            })
        );
        assert_eq!(lower("<move/>"), Some(Command::Move { x: 0.0, y: 0.0 }));
    }

    #[test]
    fn test_unrecognized_commands() {
        assert_eq!(lower("<group/>"), None);
        assert_eq!(lower(r#"<rect x="left"/>"#), None);
        assert_eq!(lower(r#"<translate dx="NaN"/>"#), None);
    }
}
