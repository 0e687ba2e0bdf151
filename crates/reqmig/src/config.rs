//! Configuration types for module migration.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from an
//! external file. Every section is optional and falls back to its defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`SanitizerConfig`] - Rich-text normalization options.
//! - [`DiagramConfig`] - Presentation of reconstructed diagrams.
//! - [`AttachmentConfig`] - Resolution of legacy resource paths.
//! - [`MappingConfig`] - Fallbacks for value lookups.
//!
//! # Example
//!
//! ```
//! # use reqmig::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.sanitizer().style_tables());
//! assert_eq!(config.diagram().display_width(), 70);
//! ```

use serde::Deserialize;

/// Project-root directory name that legacy resource paths are made relative to.
pub const DEFAULT_ANCHOR: &str = "modules_Test_Project_Template\\";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    sanitizer: SanitizerConfig,

    #[serde(default)]
    diagram: DiagramConfig,

    #[serde(default)]
    attachments: AttachmentConfig,

    #[serde(default)]
    mapping: MappingConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        sanitizer: SanitizerConfig,
        diagram: DiagramConfig,
        attachments: AttachmentConfig,
        mapping: MappingConfig,
    ) -> Self {
        Self {
            sanitizer,
            diagram,
            attachments,
            mapping,
        }
    }

    /// Returns the sanitizer configuration.
    pub fn sanitizer(&self) -> &SanitizerConfig {
        &self.sanitizer
    }

    /// Returns the diagram configuration.
    pub fn diagram(&self) -> &DiagramConfig {
        &self.diagram
    }

    /// Returns the attachment configuration.
    pub fn attachments(&self) -> &AttachmentConfig {
        &self.attachments
    }

    /// Returns the mapping configuration.
    pub fn mapping(&self) -> &MappingConfig {
        &self.mapping
    }
}

/// Rich-text normalization options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Rewrite `table`/`td` styling to the fixed presentation.
    style_tables: bool,
}

impl SanitizerConfig {
    pub fn new(style_tables: bool) -> Self {
        Self { style_tables }
    }

    /// Whether table and cell styles are normalized.
    pub fn style_tables(&self) -> bool {
        self.style_tables
    }
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self { style_tables: true }
    }
}

/// Presentation of reconstructed diagrams inside descriptions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Display width of the embedded image, in percent.
    display_width: u8,

    /// Alternative text of the embedded image.
    alt_text: String,
}

impl DiagramConfig {
    pub fn new(display_width: u8, alt_text: impl Into<String>) -> Self {
        Self {
            display_width,
            alt_text: alt_text.into(),
        }
    }

    /// Returns the display width percentage.
    pub fn display_width(&self) -> u8 {
        self.display_width
    }

    /// Returns the image alternative text.
    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            display_width: 70,
            alt_text: "Diagram".to_string(),
        }
    }
}

/// Resolution of legacy absolute resource paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    /// Substring marking the project root inside legacy paths.
    anchor: String,
}

impl AttachmentConfig {
    pub fn new(anchor: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
        }
    }

    /// Returns the project-root anchor.
    pub fn anchor(&self) -> &str {
        &self.anchor
    }
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR.to_string(),
        }
    }
}

/// Fallbacks for mapping lookups.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Grouping code for module types missing from the table. When unset,
    /// the module type itself is used.
    default_space_id: Option<String>,
}

impl MappingConfig {
    pub fn new(default_space_id: Option<String>) -> Self {
        Self { default_space_id }
    }

    /// Returns the fallback grouping code, if configured.
    pub fn default_space_id(&self) -> Option<&str> {
        self.default_space_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.sanitizer().style_tables());
        assert_eq!(config.diagram().display_width(), 70);
        assert_eq!(config.diagram().alt_text(), "Diagram");
        assert_eq!(config.attachments().anchor(), DEFAULT_ANCHOR);
        assert_eq!(config.mapping().default_space_id(), None);
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [diagram]
            display_width = 50

            [mapping]
            default_space_id = "99 Other"
            "#,
        )
        .unwrap();

        assert_eq!(config.diagram().display_width(), 50);
        assert_eq!(config.diagram().alt_text(), "Diagram");
        assert!(config.sanitizer().style_tables());
        assert_eq!(config.mapping().default_space_id(), Some("99 Other"));
    }

    #[test]
    fn test_anchor_with_backslash() {
        let config: AppConfig = toml::from_str(
            r#"
            [attachments]
            anchor = 'Project\'
            "#,
        )
        .unwrap();

        assert_eq!(config.attachments().anchor(), "Project\\");
    }
}
