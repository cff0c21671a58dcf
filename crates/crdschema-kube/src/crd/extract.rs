//! Schema extraction from CRD manifests
//!
//! A manifest stream may hold bare CRDs, `List`-style wrappers with an
//! `items` array, or both. Each CRD yields one schema per version:
//!
//! ```text
//! spec.versions[] (non-empty) ──► versions[].schema.openAPIV3Schema
//!                                   └─ else spec.validation.openAPIV3Schema
//! spec.validation (no versions) ──► spec.validation.openAPIV3Schema
//!                                   named after spec.version
//! ```

use serde_json::Value;

use super::loader::load_documents;
use crate::error::{KubeError, Result};
use crate::naming::{FilenameFields, FilenameTemplate};

/// Kind of the documents we extract schemas from
pub const CRD_KIND: &str = "CustomResourceDefinition";

/// One (kind, version) schema pulled out of a CRD
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSchema {
    /// `spec.names.kind`
    pub kind: String,
    /// `spec.group`
    pub group: String,
    /// Version name the schema belongs to
    pub version: String,
    /// Rendered output file name, e.g. `widget_v1.json`
    pub file_name: String,
    /// Raw `openAPIV3Schema`, before any transform
    pub schema: Value,
}

/// Load a YAML stream and extract every CRD schema in it
pub fn extract_from_str(text: &str, template: &FilenameTemplate) -> Result<Vec<ExtractedSchema>> {
    let documents = load_documents(text)?;
    extract_schemas(&documents, template)
}

/// Gather candidate CRDs from parsed documents
///
/// Every element of a document's `items` array is a candidate, whatever its
/// kind. A document whose own `kind` is `CustomResourceDefinition` is a
/// candidate too. Non-mapping documents are ignored.
pub fn collect_crds(documents: &[Value]) -> Vec<&Value> {
    let mut crds = Vec::new();

    for document in documents {
        if !document.is_object() {
            tracing::debug!("skipping non-mapping YAML document");
            continue;
        }

        if let Some(items) = document.get("items") {
            match items.as_array() {
                Some(items) => crds.extend(items),
                None => tracing::debug!("ignoring non-sequence 'items' field"),
            }
        }

        if document.get("kind").and_then(Value::as_str) == Some(CRD_KIND) {
            crds.push(document);
        }
    }

    crds
}

/// Extract the schema of every version of every candidate CRD
pub fn extract_schemas(
    documents: &[Value],
    template: &FilenameTemplate,
) -> Result<Vec<ExtractedSchema>> {
    let mut schemas = Vec::new();
    for crd in collect_crds(documents) {
        extract_crd(crd, template, &mut schemas)?;
    }
    Ok(schemas)
}

fn extract_crd(
    crd: &Value,
    template: &FilenameTemplate,
    schemas: &mut Vec<ExtractedSchema>,
) -> Result<()> {
    let spec = crd.get("spec");
    let legacy_schema = spec
        .and_then(|s| s.get("validation"))
        .and_then(|v| v.get("openAPIV3Schema"));
    let versions = spec
        .and_then(|s| s.get("versions"))
        .and_then(Value::as_array)
        .filter(|versions| !versions.is_empty());

    if let Some(versions) = versions {
        for version in versions {
            let schema = version
                .get("schema")
                .and_then(|s| s.get("openAPIV3Schema"))
                .or(legacy_schema);

            let Some(schema) = schema else {
                let version_name = version.get("name").and_then(Value::as_str);
                tracing::debug!(
                    crd = crd_name(crd),
                    version = version_name,
                    "version has no openAPIV3Schema"
                );
                continue;
            };

            let name = required_text(crd, version, &["name"], "spec.versions[].name")?;
            schemas.push(build(crd, name, schema, template)?);
        }
    } else if let Some(schema) = legacy_schema {
        let name = required_text(crd, crd, &["spec", "version"], "spec.version")?;
        schemas.push(build(crd, name, schema, template)?);
    } else {
        tracing::debug!(crd = crd_name(crd), "no schema found, skipping");
    }

    Ok(())
}

fn build(
    crd: &Value,
    version: String,
    schema: &Value,
    template: &FilenameTemplate,
) -> Result<ExtractedSchema> {
    let kind = required_text(crd, crd, &["spec", "names", "kind"], "spec.names.kind")?;
    let group = required_text(crd, crd, &["spec", "group"], "spec.group")?;

    let file_name = template.render(&FilenameFields {
        kind: &kind,
        version: &version,
        group: &group,
    });

    Ok(ExtractedSchema {
        kind,
        group,
        version,
        file_name,
        schema: schema.clone(),
    })
}

/// Read a scalar at `path` below `root` as text
///
/// Numbers and booleans are accepted in their JSON form so that an unquoted
/// value such as `version: 1` still names a file.
fn required_text(crd: &Value, root: &Value, path: &[&str], field: &str) -> Result<String> {
    let value = path.iter().try_fold(root, |node, key| node.get(key));

    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        _ => Err(KubeError::MissingField {
            crd: crd_name(crd).to_string(),
            field: field.to_string(),
        }),
    }
}

fn crd_name(crd: &Value) -> &str {
    crd.get("metadata")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
}
