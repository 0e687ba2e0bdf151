//! Reconstruction of embedded vector diagrams.
//!
//! A legacy artifact may carry a drawing-command document. It is parsed,
//! interpreted into shapes, rendered to SVG and embedded as an inline image.
//! A document that cannot be parsed or draws nothing yields no image.

mod export;
mod interpret;

use interpret::interpret;

use log::{debug, warn};

use reqmig_core::draw::ShapeStyle;

use crate::config::DiagramConfig;

/// Turns drawing-command documents into embeddable image fragments.
#[derive(Debug, Clone, Default)]
pub struct DiagramReconstructor {
    config: DiagramConfig,
    style: ShapeStyle,
}

impl DiagramReconstructor {
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            config,
            style: ShapeStyle::default(),
        }
    }

    /// Reconstructs one command document.
    ///
    /// Returns the `<div>`-wrapped image fragment, or `None` when the
    /// document is blank, malformed or draws no shapes.
    pub fn reconstruct(&self, source: &str) -> Option<String> {
        if source.trim().is_empty() {
            return None;
        }

        let root = match reqmig_parser::parse(source) {
            Ok(root) => root,
            Err(err) => {
                warn!(err:%; "Dropping diagram with malformed command document");
                return None;
            }
        };

        let diagram = interpret(&root);
        let Some(svg) = export::render_svg(&diagram, &self.style) else {
            debug!("Command document draws no shapes");
            return None;
        };

        debug!(
            shapes = diagram.shapes().len(),
            svg_len = svg.len();
            "Diagram reconstructed"
        );
        Some(export::embed(&svg, &self.config))
    }
}
