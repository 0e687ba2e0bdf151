//! Composition of the final artifact description.

use log::trace;

use crate::{diagram::DiagramReconstructor, sanitize::HtmlSanitizer};

/// Heading that separates the legacy free-text description from rich text.
const LEGACY_HEADING: &str =
    "<br/><br/>Description:<br/>-----------------------------------<br/>";

/// A sanitized fragment that carries no content.
const EMPTY_BLOCK: &str = "<div></div>";

/// Raw description sources of one artifact, all optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionSources<'a> {
    pub diagram: Option<&'a str>,
    pub primary: Option<&'a str>,
    pub local: Option<&'a str>,
    pub legacy: Option<&'a str>,
}

/// Builds an artifact's `description` from its diagram, rich-text fields
/// and legacy free text.
#[derive(Debug, Clone, Default)]
pub struct DescriptionComposer {
    sanitizer: HtmlSanitizer,
    diagrams: DiagramReconstructor,
}

impl DescriptionComposer {
    pub fn new(sanitizer: HtmlSanitizer, diagrams: DiagramReconstructor) -> Self {
        Self {
            sanitizer,
            diagrams,
        }
    }

    /// Composes the description, or `None` when no source contributes.
    ///
    /// Parts are taken in priority order: diagram image, primary rich text,
    /// local rich text, legacy description.
    pub fn compose(&self, sources: DescriptionSources<'_>) -> Option<String> {
        let diagram = sources
            .diagram
            .and_then(|source| self.diagrams.reconstruct(source));
        let primary = sources.primary.and_then(|raw| self.rich_text(raw));
        let local = sources.local.and_then(|raw| self.rich_text(raw));
        let legacy = sources
            .legacy
            .filter(|text| !text.trim().is_empty())
            .map(|text| format!("{LEGACY_HEADING}{text}"));

        join_unique([diagram, primary, local, legacy].into_iter().flatten())
    }

    fn rich_text(&self, raw: &str) -> Option<String> {
        let sanitized = self.sanitizer.sanitize(raw);
        if sanitized.is_empty() || sanitized == EMPTY_BLOCK {
            None
        } else {
            Some(sanitized)
        }
    }
}

/// Concatenates parts, dropping any part equal to an earlier one.
fn join_unique(parts: impl IntoIterator<Item = String>) -> Option<String> {
    let mut kept: Vec<String> = Vec::new();
    for part in parts {
        if kept.contains(&part) {
            trace!(len = part.len(); "Dropping duplicate description part");
            continue;
        }
        kept.push(part);
    }

    (!kept.is_empty()).then(|| kept.concat())
}
