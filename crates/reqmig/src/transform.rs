//! Recursive transformation of legacy modules into the target schema.
//!
//! Every function here is pure: the legacy tree is only read, and a new
//! target tree is built bottom-up from it.

use log::{debug, trace};
use serde_json::Value;

use reqmig_core::{
    mapping::MappingTables,
    model::{
        Artifact, AttachmentEntry, Extra, GroupField, LegacyArtifact, LegacyLink, LegacyModule,
        LinkedArtifact, Module,
    },
};

use crate::{
    attachment::AttachmentCollector,
    config::MappingConfig,
    describe::{DescriptionComposer, DescriptionSources},
};

/// Borrowed view of everything one transformation needs.
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'a> {
    tables: &'static MappingTables,
    mapping: &'a MappingConfig,
    composer: &'a DescriptionComposer,
    collector: &'a AttachmentCollector,
}

impl<'a> Transformer<'a> {
    pub fn new(
        mapping: &'a MappingConfig,
        composer: &'a DescriptionComposer,
        collector: &'a AttachmentCollector,
    ) -> Self {
        Self {
            tables: MappingTables::standard(),
            mapping,
            composer,
            collector,
        }
    }

    /// Transforms a module envelope and its artifact tree.
    pub fn module(&self, legacy: &LegacyModule) -> Module {
        let tables = self.tables;
        let module_type = legacy.module_type.as_ref();

        Module {
            module_title: legacy.module_title.clone(),
            status: recode(legacy.module_status.as_ref(), |v| {
                tables.module_status().recode(v)
            }),
            created_on: legacy.created_on.clone(),
            modified_on: legacy.modified_on.clone(),
            created_by: legacy.created_by.clone(),
            modified_by: legacy.modified_by.clone(),
            module_type: recode(module_type, |v| tables.module_type().recode(v)),
            space_id: module_type.map(|v| self.space_id(v)),
            extra: self.module_extra(&legacy.extra),
            artifacts: legacy
                .artifacts
                .as_ref()
                .map(|artifacts| artifacts.iter().map(|a| self.artifact(a)).collect()),
        }
    }

    /// Transforms one artifact and, recursively, its children.
    pub fn artifact(&self, legacy: &LegacyArtifact) -> Artifact {
        let tables = self.tables;

        let description = self.composer.compose(DescriptionSources {
            diagram: legacy.diagram_image.as_deref(),
            primary: legacy.primary_text_html.as_deref(),
            local: legacy.primary_text_html_local.as_deref(),
            legacy: legacy.description.as_deref(),
        });
        if description.is_none() {
            trace!(identifier:? = legacy.identifier; "Artifact has no description");
        }

        let existing = legacy.attachments.as_ref().map(|entries| {
            entries
                .iter()
                .cloned()
                .map(AttachmentEntry::Carried)
                .collect()
        });
        let attachments = self.collector.collect(
            existing,
            legacy.wrapped_resource_saved_as.as_deref(),
            legacy.embedded_wrapped_resources_saved.as_deref().unwrap_or_default(),
        );

        Artifact {
            legacy_id: legacy.identifier.clone(),
            artifact_type: recode(legacy.artifact_type.as_ref(), |v| {
                tables.artifact_type().recode(v)
            }),
            status: recode(legacy.artifact_status.as_ref(), |v| {
                tables.artifact_status().recode(v)
            }),
            created_on: legacy.created_on.clone(),
            modified_on: legacy.modified_on.clone(),
            created_by: legacy.created_by.clone(),
            modified_by: legacy.modified_by.clone(),
            responsible_group: legacy
                .responsible_group
                .as_ref()
                .map(|group| self.responsible_group(group)),
            key_requirement: legacy
                .key_requirement
                .as_ref()
                .map(|value| self.key_requirement(value)),
            review_status: recode(legacy.review_status.as_ref(), |v| {
                tables.review_status().recode(v)
            }),
            oem_status: recode(legacy.oem_status.as_ref(), |v| {
                tables.oem_status().recode(v)
            }),
            oem_comment: legacy.oem_comment.clone(),
            supplier_status: recode(legacy.supplier_status.as_ref(), |v| {
                tables.supplier_status().recode(v)
            }),
            supplier_comment: legacy.supplier_comment.clone(),
            variant: recode(legacy.variant.as_ref(), |v| tables.variant().recode(v)),
            wrapped_resource_saved_as: legacy.wrapped_resource_saved_as.clone(),
            embedded_wrapped_resources_saved: legacy.embedded_wrapped_resources_saved.clone(),
            extra: legacy.extra.clone(),
            description,
            attachments,
            linked_artifacts: legacy
                .linked_artifacts
                .as_ref()
                .map(|links| links.iter().map(|link| self.link(link)).collect()),
            children: legacy
                .children
                .as_ref()
                .map(|children| children.iter().map(|child| self.artifact(child)).collect()),
        }
    }

    /// Transforms one link, dropping its descriptive metadata.
    pub fn link(&self, legacy: &LegacyLink) -> LinkedArtifact {
        let tables = self.tables;
        LinkedArtifact {
            legacy_id: legacy.identifier.clone(),
            link_role: recode(legacy.link_role.as_ref(), |v| tables.link_role().recode(v)),
            extra: retain_keys(&legacy.extra, |key| !tables.is_dropped_link_key(key)),
        }
    }

    /// Grouping code for a module type.
    ///
    /// A type that is not a string is never in the table, so it takes the
    /// configured default or passes through like any other unmapped type.
    fn space_id(&self, module_type: &Value) -> Value {
        let mapped = module_type
            .as_str()
            .and_then(|code| self.tables.space_id().get(code));
        match (mapped, self.mapping.default_space_id()) {
            (Some(space_id), _) => Value::from(space_id),
            (None, Some(fallback)) => {
                debug!(module_type:%, fallback; "Unmapped module type, using default space");
                Value::from(fallback)
            }
            (None, None) => module_type.clone(),
        }
    }

    /// Expands one or many categories into a de-duplicated role list.
    fn responsible_group(&self, group: &GroupField) -> Vec<String> {
        let roles = self.tables.responsible_group();
        let categories: &[String] = match group {
            GroupField::One(category) => std::slice::from_ref(category),
            GroupField::Many(categories) => categories,
        };

        let mut expanded: Vec<String> = Vec::new();
        for role in categories.iter().flat_map(|category| roles.expand(category)) {
            if !expanded.contains(&role) {
                expanded.push(role);
            }
        }
        expanded
    }

    /// Recodes string and boolean flags; any other value passes through.
    fn key_requirement(&self, value: &Value) -> Value {
        let table = self.tables.key_requirement();
        match value {
            Value::String(flag) => Value::String(table.recode(flag)),
            Value::Bool(flag) => match table.get(&flag.to_string()) {
                Some(target) => Value::String(target.to_string()),
                None => value.clone(),
            },
            other => other.clone(),
        }
    }

    fn module_extra(&self, extra: &Extra) -> Extra {
        let tables = self.tables;
        retain_keys(extra, |key| {
            let dropped = tables.is_dropped_module_key(key);
            if dropped {
                trace!(key; "Dropping module key");
            }
            !dropped
        })
    }
}

/// Recodes a string value; values of any other type pass through.
fn recode(value: Option<&Value>, lookup: impl FnOnce(&str) -> String) -> Option<Value> {
    value.map(|value| match value {
        Value::String(code) => Value::String(lookup(code)),
        other => other.clone(),
    })
}

fn retain_keys(extra: &Extra, mut keep: impl FnMut(&str) -> bool) -> Extra {
    extra
        .iter()
        .filter(|(key, _)| keep(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
