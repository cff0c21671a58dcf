//! Schema rendering pipeline
//!
//! Applies the transforms in a fixed order and serializes the result:
//!
//! 1. [`add_additional_properties_false`] (root exempt unless denied)
//! 2. [`replace_int_or_string`]
//! 3. [`allow_null_optional_fields`], only when opted in
//!
//! Output is pretty-printed JSON with two-space indentation and a trailing
//! newline, so regenerated files diff cleanly.

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::transform::{
    add_additional_properties_false, allow_null_optional_fields, replace_int_or_string,
};

/// Knobs for [`render_schema`], built once at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Also close the root schema with `additionalProperties: false`
    pub deny_root_additional_properties: bool,
    /// Run [`allow_null_optional_fields`] after the default transforms
    pub allow_null_optional_fields: bool,
}

/// Apply the configured transforms without serializing
pub fn transform_schema(schema: &Value, options: RenderOptions) -> Value {
    let closed = add_additional_properties_false(schema, !options.deny_root_additional_properties);
    let replaced = replace_int_or_string(&closed);

    if options.allow_null_optional_fields {
        allow_null_optional_fields(&replaced)
    } else {
        replaced
    }
}

/// Transform a schema and render it as JSON text
pub fn render_schema(schema: &Value, options: RenderOptions) -> Result<String> {
    let transformed = transform_schema(schema, options);
    let mut rendered = serde_json::to_string_pretty(&transformed)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Render a schema and write it into `output_dir`
///
/// Only the final component of `file_name` is used, so a file name template
/// containing path separators cannot escape the output directory. The
/// directory is created when missing and existing files are overwritten.
/// Nothing is written if rendering fails.
pub fn write_schema_file(
    schema: &Value,
    file_name: &str,
    output_dir: &Path,
    options: RenderOptions,
) -> Result<PathBuf> {
    let base_name = Path::new(file_name)
        .file_name()
        .ok_or_else(|| CoreError::InvalidFileName {
            name: file_name.to_string(),
        })?;

    let rendered = render_schema(schema, options)?;

    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(base_name);
    std::fs::write(&output_path, rendered)?;

    tracing::debug!(path = %output_path.display(), "wrote schema");
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn widget_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "spec": {
                    "type": "object",
                    "properties": {
                        "port": {
                            "format": "int-or-string",
                            "x-kubernetes-int-or-string": true
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_render_default_options() {
        let rendered = render_schema(&widget_schema(), RenderOptions::default()).unwrap();
        insta::assert_snapshot!(rendered.trim_end(), @r#"
        {
          "type": "object",
          "properties": {
            "spec": {
              "type": "object",
              "properties": {
                "port": {
                  "oneOf": [
                    {
                      "type": "string"
                    },
                    {
                      "type": "integer"
                    }
                  ]
                }
              },
              "additionalProperties": false
            }
          }
        }
        "#);
    }

    #[test]
    fn test_render_ends_with_newline() {
        let rendered = render_schema(&json!({}), RenderOptions::default()).unwrap();
        assert_eq!(rendered, "{}\n");
    }

    #[test]
    fn test_deny_root_additional_properties() {
        let options = RenderOptions {
            deny_root_additional_properties: true,
            ..Default::default()
        };
        let transformed = transform_schema(&widget_schema(), options);
        assert_eq!(transformed["additionalProperties"], json!(false));
    }

    #[test]
    fn test_root_exempt_by_default() {
        let transformed = transform_schema(&widget_schema(), RenderOptions::default());
        assert!(transformed.get("additionalProperties").is_none());
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        for deny in [false, true] {
            let options = RenderOptions {
                deny_root_additional_properties: deny,
                ..Default::default()
            };
            let once = transform_schema(&widget_schema(), options);
            let twice = transform_schema(&once, options);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_int_or_string_with_properties_is_fully_replaced() {
        let schema = json!({
            "properties": {
                "value": {"format": "int-or-string", "properties": {"a": {}}}
            }
        });
        let transformed = transform_schema(&schema, RenderOptions::default());
        assert_eq!(
            transformed["properties"]["value"],
            json!({"oneOf": [{"type": "string"}, {"type": "integer"}]})
        );
    }

    #[test]
    fn test_null_widening_is_opt_in() {
        let schema = json!({"properties": {"name": {"type": "string"}}});

        let transformed = transform_schema(&schema, RenderOptions::default());
        assert_eq!(transformed["properties"]["name"]["type"], json!("string"));

        let options = RenderOptions {
            allow_null_optional_fields: true,
            ..Default::default()
        };
        let transformed = transform_schema(&schema, options);
        assert_eq!(
            transformed["properties"]["name"]["type"],
            json!(["string", "null"])
        );
    }

    #[test]
    fn test_write_schema_file_creates_directory() {
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("schemas").join("nested");

        let path = write_schema_file(
            &json!({"properties": {"id": {"type": "string"}}}),
            "widget_v1.json",
            &output_dir,
            RenderOptions::default(),
        )
        .unwrap();

        assert_eq!(path, output_dir.join("widget_v1.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, json!({"properties": {"id": {"type": "string"}}}));
    }

    #[test]
    fn test_write_schema_file_uses_base_name() {
        let temp = TempDir::new().unwrap();

        let path = write_schema_file(
            &json!({}),
            "example.com/widget_v1.json",
            temp.path(),
            RenderOptions::default(),
        )
        .unwrap();

        assert_eq!(path, temp.path().join("widget_v1.json"));
        assert!(path.exists());
    }

    #[test]
    fn test_write_schema_file_overwrites() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("widget_v1.json");
        std::fs::write(&target, "stale").unwrap();

        write_schema_file(&json!({"a": 1}), "widget_v1.json", temp.path(), RenderOptions::default())
            .unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn test_write_schema_file_rejects_empty_name() {
        let temp = TempDir::new().unwrap();
        let result = write_schema_file(&json!({}), "..", temp.path(), RenderOptions::default());
        assert!(matches!(result, Err(CoreError::InvalidFileName { .. })));
    }
}
