//! Drawing primitives for reconstructed diagrams.
//!
//! A diagram command document resolves into a flat list of [`Shape`]s. Each
//! shape is rendered to a single SVG primitive styled by a [`ShapeStyle`].

mod shape;
mod stroke;

pub use shape::Shape;
pub use stroke::StrokeDefinition;

use crate::color::Color;

/// Presentational attributes shared by every rendered shape.
#[derive(Debug, Clone)]
pub struct ShapeStyle {
    fill: Color,
    stroke: StrokeDefinition,
}

impl ShapeStyle {
    /// Returns the fill color.
    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Returns the stroke definition.
    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }
}

impl Default for ShapeStyle {
    /// White fill with a 2px slate outline.
    fn default() -> Self {
        Self {
            fill: Color::shape_fill(),
            stroke: StrokeDefinition::new(Color::shape_outline(), 2.0),
        }
    }
}
