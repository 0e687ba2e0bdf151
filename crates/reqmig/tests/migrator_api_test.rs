//! Integration tests for the Migrator API
//!
//! These tests drive whole legacy documents through the public API and check
//! the migrated JSON.

use serde_json::{Value, json};

use reqmig::{
    Migrator, MigrationError,
    config::{AppConfig, AttachmentConfig, DiagramConfig, MappingConfig, SanitizerConfig},
};

fn migrate(document: Value) -> Value {
    let migrator = Migrator::default();
    let module = migrator
        .transform_str(&document.to_string())
        .expect("Failed to transform document");
    serde_json::to_value(&module).expect("Failed to encode module")
}

fn first_artifact(module: &Value) -> &Value {
    &module["artifacts"][0]
}

#[test]
fn test_module_type_and_status() {
    let module = migrate(json!({
        "module_title": "Braking",
        "module_status": "In work",
        "module_type": "Req",
        "artifacts": [
            { "identifier": 101, "artifact_status": "Approved", "artifact_type": "Heading" }
        ],
    }));

    assert_eq!(module["module_type"], "sthRS");
    assert_eq!(module["space_id"], "01 Stakeholder");
    assert_eq!(module["status"], "draft");

    let artifact = first_artifact(&module);
    assert_eq!(artifact["legacyID"], 101);
    assert_eq!(artifact["status"], "reviewed");
    assert_eq!(artifact["artifact_type"], "heading");
}

#[test]
fn test_renamed_artifact_keys() {
    let module = migrate(json!({
        "artifacts": [{
            "identifier": "A-1",
            "created_on": "2020-01-01",
            "modified_by": "jdoe",
            "review_status": "In review",
            "oem_status": "Accepted",
            "oem-comment": "fine",
            "supplier_status": "Agreed",
            "supplier-comment": "ok",
            "key_requirement": "Yes",
            "variant": "Base",
        }],
    }));

    let artifact = first_artifact(&module);
    assert_eq!(artifact["CreatedOn"], "2020-01-01");
    assert_eq!(artifact["ModifiedBy"], "jdoe");
    assert_eq!(artifact["reviewStatus"], "inReview");
    assert_eq!(artifact["oemStatus"], "accepted");
    assert_eq!(artifact["oemComment"], "fine");
    assert_eq!(artifact["supplierStatus"], "agreed");
    assert_eq!(artifact["supplierComment"], "ok");
    assert_eq!(artifact["keyRequirement"], "yes");
    assert_eq!(artifact["variant"], "base");
    assert!(artifact.get("oem-comment").is_none());
    assert!(artifact.get("identifier").is_none());
}

#[test]
fn test_unknown_values_pass_through() {
    let module = migrate(json!({
        "module_status": "Frozen",
        "module_type": "Custom",
        "artifacts": [{ "artifact_status": "Parked", "artifact_type": "Sketch" }],
    }));

    assert_eq!(module["status"], "Frozen");
    assert_eq!(module["module_type"], "Custom");
    assert_eq!(module["space_id"], "Custom");

    let artifact = first_artifact(&module);
    assert_eq!(artifact["status"], "Parked");
    assert_eq!(artifact["artifact_type"], "Sketch");
}

#[test]
fn test_responsible_group() {
    let module = migrate(json!({
        "artifacts": [
            { "responsible_group": "Simulation" },
            { "responsible_group": "Custom" },
            { "responsible_group": ["Testing", "Validation", "Quality"] },
        ],
    }));

    assert_eq!(
        module["artifacts"][0]["responsibleGroup"],
        json!(["development", "afterMarketService"])
    );
    assert_eq!(module["artifacts"][1]["responsibleGroup"], json!(["Custom"]));
    assert_eq!(
        module["artifacts"][2]["responsibleGroup"],
        json!(["testing", "quality"])
    );
}

#[test]
fn test_description_composition() {
    let module = migrate(json!({
        "artifacts": [
            {
                "primary_text_html": "<ns0:primarytext><html:p>Shall brake.</html:p></ns0:primarytext>",
                "primary_text_html_local": "<p>Shall brake.</p>",
                "description": "Legacy text",
            },
            { "primary_text_html": "<p> </p>", "description": "  " },
        ],
    }));

    assert_eq!(
        module["artifacts"][0]["description"],
        "<div><p>Shall brake.</p></div><br/><br/>Description:<br/>-----------------------------------<br/>Legacy text"
    );
    assert!(module["artifacts"][1].get("description").is_none());
}

#[test]
fn test_diagram_in_description() {
    let module = migrate(json!({
        "artifacts": [{
            "diagram_image": "<drawing><width size=\"100\"/><rect x=\"5\" y=\"5\" w=\"20\" h=\"10\"/></drawing>",
            "primary_text_html": "<p>See diagram.</p>",
        }],
    }));

    let description = first_artifact(&module)["description"]
        .as_str()
        .expect("description should be a string");
    assert!(description.starts_with(r#"<div><img src="data:image/svg+xml;charset=utf-8,"#));
    assert!(description.contains("%3Crect"));
    assert!(description.contains(r#"alt="Diagram" style="width: 70%;"/></div>"#));
    assert!(description.ends_with("<div><p>See diagram.</p></div>"));
}

#[test]
fn test_malformed_diagram_is_omitted() {
    let module = migrate(json!({
        "artifacts": [{ "diagram_image": "<drawing><rect></drawing>" }],
    }));

    assert!(first_artifact(&module).get("description").is_none());
}

#[test]
fn test_attachments() {
    let module = migrate(json!({
        "artifacts": [{
            "attachments": [{ "file_path": "existing.pdf" }],
            "wrapped_resource_saved_as": "C:\\export\\modules_Test_Project_Template\\SubDir\\Spec.docx",
            "embedded_wrapped_resources_saved": ["C:\\export\\modules_Test_Project_Template\\img\\fig.png"],
        }],
    }));

    let artifact = first_artifact(&module);
    assert_eq!(
        artifact["attachments"],
        json!([
            { "file_path": "existing.pdf" },
            { "file_path": "SubDir\\Spec.docx", "file_name_in_polarion": "Spec", "title": "Spec" },
            { "file_path": "img\\fig.png", "file_name_in_polarion": "fig", "title": "fig" },
        ])
    );
    assert_eq!(
        artifact["wrapped_resource_saved_as"],
        "C:\\export\\modules_Test_Project_Template\\SubDir\\Spec.docx"
    );
}

#[test]
fn test_links_and_dropped_keys() {
    let module = migrate(json!({
        "module_uri": "urn:module",
        "module_id": 9,
        "linked_artifacts": [],
        "project": "P1",
        "artifacts": [{
            "linked_artifacts": [{
                "identifier": 7,
                "link_role": "satisfies",
                "link_role_uri": "urn:role",
                "link_role_label": "Satisfies",
            }],
        }],
    }));

    assert!(module.get("module_uri").is_none());
    assert!(module.get("module_id").is_none());
    assert!(module.get("linked_artifacts").is_none());
    assert_eq!(module["project"], "P1");
    assert_eq!(
        first_artifact(&module)["linked_artifacts"],
        json!([{ "legacyID": 7, "link_role": "satisfy" }])
    );
}

#[test]
fn test_nested_children_and_work_items() {
    let migrator = Migrator::default();
    let module = migrator
        .transform_str(
            &json!({
                "artifacts": [
                    { "identifier": 1, "children": [
                        { "identifier": 2, "artifact_status": "Released" },
                        { "identifier": 3, "children": [ { "identifier": 4 } ] },
                    ] },
                    { "identifier": 5 },
                ],
            })
            .to_string(),
        )
        .expect("Failed to transform document");

    assert_eq!(module.work_item_count(), 5);

    let encoded = serde_json::to_value(&module).unwrap();
    assert_eq!(encoded["artifacts"][0]["children"][0]["status"], "released");
    assert_eq!(
        encoded["artifacts"][0]["children"][1]["children"][0]["legacyID"],
        4
    );
}

#[test]
fn test_deep_artifact_tree() {
    const DEPTH: usize = 100;

    let mut source = String::from(r#"{"artifacts": ["#);
    for level in 1..=DEPTH {
        source.push_str(&format!(r#"{{"identifier": {level}, "artifact_status": "Approved""#));
        if level < DEPTH {
            source.push_str(r#", "children": ["#);
        }
    }
    source.push_str(&"}]".repeat(DEPTH));
    source.push('}');

    let module = Migrator::default()
        .transform_str(&source)
        .expect("Failed to transform deep document");
    assert_eq!(module.work_item_count(), DEPTH);

    let mut artifact = &module.artifacts.as_ref().unwrap()[0];
    let mut level = 1;
    while let Some(children) = &artifact.children {
        assert_eq!(artifact.status, Some(json!("reviewed")));
        artifact = &children[0];
        level += 1;
    }
    assert_eq!(level, DEPTH);
    assert_eq!(artifact.legacy_id, Some(json!(DEPTH)));
}

#[test]
fn test_non_string_codes_pass_through() {
    let module = migrate(json!({
        "module_status": 3,
        "artifacts": [{
            "variant": 2,
            "review_status": true,
            "linked_artifacts": [{ "identifier": 1, "link_role": null }],
        }],
    }));

    assert_eq!(module["status"], 3);
    let artifact = first_artifact(&module);
    assert_eq!(artifact["variant"], 2);
    assert_eq!(artifact["reviewStatus"], true);
    assert_eq!(artifact["linked_artifacts"], json!([{ "legacyID": 1 }]));
}

#[test]
fn test_empty_resource_path_is_skipped() {
    let module = migrate(json!({
        "artifacts": [{ "wrapped_resource_saved_as": "" }],
    }));

    let artifact = first_artifact(&module);
    assert!(artifact.get("attachments").is_none());
    assert_eq!(artifact["wrapped_resource_saved_as"], "");
}

#[test]
fn test_custom_config() {
    let config = AppConfig::new(
        SanitizerConfig::new(false),
        DiagramConfig::new(40, "Sketch"),
        AttachmentConfig::new("Root/"),
        MappingConfig::new(Some("99 Other".to_string())),
    );
    let migrator = Migrator::new(config);

    let module = migrator
        .transform_str(
            &json!({
                "module_type": "Unclassified",
                "artifacts": [{
                    "diagram_image": "<d><ellipse w=\"4\" h=\"4\"/></d>",
                    "wrapped_resource_saved_as": "/data/Root/docs/a.txt",
                }],
            })
            .to_string(),
        )
        .expect("Failed to transform document");

    assert_eq!(module.space_id, Some(json!("99 Other")));

    let encoded = serde_json::to_value(&module).unwrap();
    let artifact = &encoded["artifacts"][0];
    let description = artifact["description"].as_str().unwrap();
    assert!(description.contains(r#"alt="Sketch" style="width: 40%;""#));
    assert_eq!(artifact["attachments"][0]["file_path"], "docs/a.txt");
}

#[test]
fn test_render_is_pretty_and_keeps_unicode() {
    let migrator = Migrator::default();
    let module = migrator
        .transform_str(r#"{"module_title": "Bremsanlage – Übersicht", "module_type": "Req"}"#)
        .expect("Failed to transform document");

    let rendered = migrator.render(&module).expect("Failed to render module");
    assert!(rendered.contains("\n  \"module_title\": \"Bremsanlage – Übersicht\""));
    assert!(rendered.contains("\"space_id\": \"01 Stakeholder\""));
}

#[test]
fn test_invalid_json_returns_error() {
    let migrator = Migrator::default();
    let result = migrator.transform_str("{ \"artifacts\": [ }");

    match result {
        Err(MigrationError::Json { src, .. }) => assert_eq!(src, "{ \"artifacts\": [ }"),
        other => panic!("Expected JSON error, got {other:?}"),
    }
}

#[test]
fn test_migrator_reusability() {
    let migrator = Migrator::default();
    let first = migrator
        .transform_str(r#"{"module_type": "Des"}"#)
        .expect("Failed to transform first document");
    let second = migrator
        .transform_str(r#"{"module_type": "Dt"}"#)
        .expect("Failed to transform second document");

    assert_eq!(first.space_id, Some(json!("03 Design")));
    assert_eq!(second.space_id, Some(json!("04 Verification")));
}
