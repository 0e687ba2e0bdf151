//! Target (import schema) document types.

use serde::Serialize;
use serde_json::Value;

use super::Extra;

/// A migrated module document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Module {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(rename = "CreatedOn", skip_serializing_if = "Option::is_none")]
    pub created_on: Option<Value>,
    #[serde(rename = "ModifiedOn", skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<Value>,
    #[serde(rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Value>,
    #[serde(rename = "ModifiedBy", skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<Value>,
    /// Target type code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_type: Option<Value>,
    /// Grouping code derived from the legacy module type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<Artifact>>,
}

impl Module {
    /// Number of artifacts in the module, descendants included.
    pub fn work_item_count(&self) -> usize {
        self.artifacts
            .iter()
            .flatten()
            .map(Artifact::work_item_count)
            .sum()
    }
}

/// A migrated artifact node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Artifact {
    #[serde(rename = "legacyID", skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(rename = "CreatedOn", skip_serializing_if = "Option::is_none")]
    pub created_on: Option<Value>,
    #[serde(rename = "ModifiedOn", skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<Value>,
    #[serde(rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Value>,
    #[serde(rename = "ModifiedBy", skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<Value>,
    #[serde(rename = "responsibleGroup", skip_serializing_if = "Option::is_none")]
    pub responsible_group: Option<Vec<String>>,
    #[serde(rename = "keyRequirement", skip_serializing_if = "Option::is_none")]
    pub key_requirement: Option<Value>,
    #[serde(rename = "reviewStatus", skip_serializing_if = "Option::is_none")]
    pub review_status: Option<Value>,
    #[serde(rename = "oemStatus", skip_serializing_if = "Option::is_none")]
    pub oem_status: Option<Value>,
    #[serde(rename = "oemComment", skip_serializing_if = "Option::is_none")]
    pub oem_comment: Option<Value>,
    #[serde(rename = "supplierStatus", skip_serializing_if = "Option::is_none")]
    pub supplier_status: Option<Value>,
    #[serde(rename = "supplierComment", skip_serializing_if = "Option::is_none")]
    pub supplier_comment: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapped_resource_saved_as: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedded_wrapped_resources_saved: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Extra,
    /// Composed description; absent when no source contributed a part.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_artifacts: Option<Vec<LinkedArtifact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Artifact>>,
}

impl Artifact {
    /// Counts this artifact and all of its descendants.
    pub fn work_item_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(Artifact::work_item_count)
            .sum::<usize>()
    }
}

/// A directed edge: target legacy identifier plus relationship role.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkedArtifact {
    #[serde(rename = "legacyID", skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_role: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A file reference resolved relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub file_path: String,
    #[serde(rename = "file_name_in_polarion")]
    pub file_name: String,
    pub title: String,
}

impl Attachment {
    /// Creates an attachment whose title equals its file name.
    pub fn new(file_path: impl Into<String>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            file_path: file_path.into(),
            title: file_name.clone(),
            file_name,
        }
    }
}

/// One entry of an artifact's attachment list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttachmentEntry {
    /// An entry already present in the exported document, carried verbatim.
    Carried(Value),
    /// An entry resolved from a wrapped-resource path.
    Collected(Attachment),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn leaf() -> Artifact {
        Artifact::default()
    }

    #[test]
    fn test_work_item_count() {
        let mut parent = leaf();
        let mut child = leaf();
        child.children = Some(vec![leaf(), leaf()]);
        parent.children = Some(vec![child, leaf()]);

        let module = Module {
            artifacts: Some(vec![parent, leaf()]),
            ..Module::default()
        };

        assert_eq!(module.work_item_count(), 6);
        assert_eq!(Module::default().work_item_count(), 0);
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let artifact = Artifact {
            legacy_id: Some(json!(7)),
            status: Some(json!("reviewed")),
            ..Artifact::default()
        };

        assert_eq!(
            serde_json::to_value(&artifact).unwrap(),
            json!({ "legacyID": 7, "status": "reviewed" })
        );
    }

    #[test]
    fn test_attachment_serialization() {
        let entries = vec![
            AttachmentEntry::Carried(json!({ "file_path": "old.pdf" })),
            AttachmentEntry::Collected(Attachment::new("SubDir\\Spec.docx", "Spec")),
        ];

        assert_eq!(
            serde_json::to_value(&entries).unwrap(),
            json!([
                { "file_path": "old.pdf" },
                {
                    "file_path": "SubDir\\Spec.docx",
                    "file_name_in_polarion": "Spec",
                    "title": "Spec"
                }
            ])
        );
    }

    #[test]
    fn test_extra_follows_recognized_fields() {
        let mut extra = Extra::new();
        extra.insert("owner".into(), json!("team-a"));
        let module = Module {
            module_title: Some(json!("Brakes")),
            extra,
            artifacts: Some(Vec::new()),
            ..Module::default()
        };

        let text = serde_json::to_string(&module).unwrap();
        assert_eq!(
            text,
            r#"{"module_title":"Brakes","owner":"team-a","artifacts":[]}"#
        );
    }
}
