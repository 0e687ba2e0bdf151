//! Legacy (exported) document types.

use serde::Deserialize;
use serde_json::Value;

use super::Extra;

/// A responsible-group value: one category or a list of categories.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GroupField {
    One(String),
    Many(Vec<String>),
}

/// One exported module document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyModule {
    pub module_title: Option<Value>,
    pub module_status: Option<Value>,
    pub created_on: Option<Value>,
    pub modified_on: Option<Value>,
    pub created_by: Option<Value>,
    pub modified_by: Option<Value>,
    pub module_type: Option<Value>,
    pub artifacts: Option<Vec<LegacyArtifact>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One node of the exported artifact tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyArtifact {
    pub identifier: Option<Value>,
    pub artifact_type: Option<Value>,
    pub artifact_status: Option<Value>,
    pub created_on: Option<Value>,
    pub modified_on: Option<Value>,
    pub created_by: Option<Value>,
    pub modified_by: Option<Value>,
    pub responsible_group: Option<GroupField>,
    pub key_requirement: Option<Value>,
    pub review_status: Option<Value>,
    pub oem_status: Option<Value>,
    #[serde(rename = "oem-comment")]
    pub oem_comment: Option<Value>,
    pub supplier_status: Option<Value>,
    #[serde(rename = "supplier-comment")]
    pub supplier_comment: Option<Value>,
    pub variant: Option<Value>,

    /// Legacy free-text description.
    pub description: Option<String>,
    /// Primary rich-text field.
    pub primary_text_html: Option<String>,
    /// Secondary ("local") rich-text field.
    pub primary_text_html_local: Option<String>,
    /// Diagram command document.
    pub diagram_image: Option<String>,

    /// Absolute path of the primary wrapped resource.
    pub wrapped_resource_saved_as: Option<String>,
    /// Absolute paths of embedded wrapped resources.
    pub embedded_wrapped_resources_saved: Option<Vec<String>>,
    pub attachments: Option<Vec<Value>>,

    pub linked_artifacts: Option<Vec<LegacyLink>>,
    pub children: Option<Vec<LegacyArtifact>>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// A directed edge from an artifact to another artifact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyLink {
    pub identifier: Option<Value>,
    pub link_role: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}
