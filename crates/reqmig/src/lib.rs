//! Reqmig - migrates exported requirements modules to a target import schema.
//!
//! A legacy module is a JSON document holding a tree of artifacts. Migration
//! renames and recodes fields, normalizes rich text, reconstructs embedded
//! diagrams as inline SVG images and resolves attachment paths. The
//! transformation itself is pure; only decoding and encoding can fail.

pub mod config;

mod attachment;
mod describe;
mod diagram;
mod error;
mod sanitize;
mod transform;

pub use reqmig_core::{mapping, model};

pub use attachment::AttachmentCollector;
pub use describe::{DescriptionComposer, DescriptionSources};
pub use diagram::DiagramReconstructor;
pub use error::MigrationError;
pub use sanitize::HtmlSanitizer;

use log::{debug, info, trace};
use serde::Deserialize;

use config::AppConfig;
use model::{LegacyModule, Module};
use transform::Transformer;

/// Migrates legacy module documents.
///
/// A `Migrator` is immutable once built and can be shared between threads,
/// so independent documents may be transformed concurrently.
///
/// # Examples
///
/// ```
/// use reqmig::{Migrator, config::AppConfig};
///
/// let migrator = Migrator::new(AppConfig::default());
/// let module = migrator
///     .transform_str(r#"{"module_type": "Req", "artifacts": []}"#)
///     .expect("valid document");
///
/// assert_eq!(module.module_type, Some("sthRS".into()));
/// assert_eq!(module.space_id, Some("01 Stakeholder".into()));
///
/// let json = migrator.render(&module).expect("serializable");
/// assert!(json.contains("\"space_id\": \"01 Stakeholder\""));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Migrator {
    config: AppConfig,
    composer: DescriptionComposer,
    collector: AttachmentCollector,
}

impl Migrator {
    /// Create a new migrator with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let sanitizer = HtmlSanitizer::new(config.sanitizer().clone());
        let diagrams = DiagramReconstructor::new(config.diagram().clone());
        let collector = AttachmentCollector::new(config.attachments().clone());

        Self {
            composer: DescriptionComposer::new(sanitizer, diagrams),
            collector,
            config,
        }
    }

    /// Returns the configuration this migrator was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Transform a decoded legacy module into the target schema.
    pub fn transform(&self, legacy: &LegacyModule) -> Module {
        let transformer =
            Transformer::new(self.config.mapping(), &self.composer, &self.collector);
        let module = transformer.module(legacy);

        debug!(
            title:? = module.module_title,
            work_items = module.work_item_count();
            "Module transformed"
        );
        module
    }

    /// Decode a legacy module from JSON text and transform it.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::Json`] when `source` is not a valid legacy
    /// module document.
    pub fn transform_str(&self, source: &str) -> Result<Module, MigrationError> {
        info!(len = source.len(); "Decoding legacy module");

        let legacy =
            decode_module(source).map_err(|err| MigrationError::new_json_error(err, source))?;
        trace!(legacy:?; "Decoded legacy module");

        Ok(self.transform(&legacy))
    }

    /// Encode a migrated module as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::Json`] if the module cannot be serialized.
    pub fn render(&self, module: &Module) -> Result<String, MigrationError> {
        serde_json::to_string_pretty(module).map_err(|err| MigrationError::new_json_error(err, ""))
    }
}

/// Decodes a legacy module without a nesting limit.
///
/// Artifact trees are as deep as the export made them, so serde_json's
/// recursion limit is lifted and the stack grows on demand instead.
fn decode_module(source: &str) -> serde_json::Result<LegacyModule> {
    let mut deserializer = serde_json::Deserializer::from_str(source);
    deserializer.disable_recursion_limit();
    let legacy = LegacyModule::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(legacy)
}
