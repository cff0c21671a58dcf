//! Multi-document YAML loading
//!
//! Manifests are parsed with `serde_yaml` and converted into
//! `serde_json::Value` trees so the schema transforms can work on them
//! directly. The conversion keeps mapping order.

use serde::Deserialize;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;
use serde_yaml::value::{Tag, TaggedValue};

use crate::error::{KubeError, Result};

/// Parse every document of a YAML stream, skipping empty ones
///
/// Merge keys (`<<: *anchor`) are resolved before conversion.
pub fn load_documents(text: &str) -> Result<Vec<Value>> {
    let mut documents = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let mut value = YamlValue::deserialize(document)?;
        if value.is_null() {
            tracing::debug!(document = index, "skipping empty YAML document");
            continue;
        }
        value.apply_merge()?;
        documents.push(yaml_to_json(value)?);
    }

    Ok(documents)
}

/// Convert a YAML value into its JSON equivalent
///
/// Nodes tagged `!value` / `!!value` are read as plain strings: YAML 1.1
/// reserves that tag for a bare `=`, and manifests in the wild carry it.
/// Other tags are dropped in favour of the tagged content.
pub fn yaml_to_json(value: YamlValue) -> Result<Value> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => number_to_json(&n)?,
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(mapping_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            if is_value_tag(&tag) {
                Value::String(scalar_text(value, &tag)?)
            } else {
                yaml_to_json(value)?
            }
        }
    })
}

fn number_to_json(n: &serde_yaml::Number) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }

    n.as_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| KubeError::Yaml(format!("number {} has no JSON representation", n)))
}

/// JSON object keys must be strings; scalar keys are stringified
fn mapping_key(key: YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            if is_value_tag(&tag) {
                scalar_text(value, &tag)
            } else {
                mapping_key(value)
            }
        }
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(KubeError::Yaml(
            "mapping keys must be scalars".to_string(),
        )),
    }
}

fn is_value_tag(tag: &Tag) -> bool {
    let name = tag.to_string();
    let name = name.trim_start_matches('!');
    name == "value" || name == "tag:yaml.org,2002:value"
}

fn scalar_text(value: YamlValue, tag: &Tag) -> Result<String> {
    match value {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok(String::new()),
        _ => Err(KubeError::Yaml(format!(
            "while constructing a value tagged {}: expected a scalar",
            tag
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_multiple_documents() {
        let yaml = r#"
kind: ConfigMap
---
---
# only a comment
---
kind: CustomResourceDefinition
"#;
        let documents = load_documents(yaml).unwrap();
        assert_eq!(
            documents,
            vec![
                json!({"kind": "ConfigMap"}),
                json!({"kind": "CustomResourceDefinition"})
            ]
        );
    }

    #[test]
    fn test_load_empty_stream() {
        assert!(load_documents("").unwrap().is_empty());
    }

    #[test]
    fn test_load_preserves_key_order() {
        let documents = load_documents("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        let keys: Vec<_> = documents[0].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_load_scalars() {
        let documents = load_documents("a: 1\nb: -2\nc: 1.5\nd: true\ne: ~\nf: text\n").unwrap();
        assert_eq!(
            documents[0],
            json!({"a": 1, "b": -2, "c": 1.5, "d": true, "e": null, "f": "text"})
        );
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        let documents = load_documents("200: ok\ntrue: yes\n").unwrap();
        assert_eq!(documents[0], json!({"200": "ok", "true": "yes"}));
    }

    #[test]
    fn test_value_tag_is_read_as_string() {
        let yaml = "pattern: !value '='\nother: !!value =\n";
        let documents = load_documents(yaml).unwrap();
        assert_eq!(documents[0], json!({"pattern": "=", "other": "="}));
    }

    #[test]
    fn test_value_tag_on_mapping_is_rejected() {
        let err = load_documents("pattern: !value {a: 1}\n").unwrap_err();
        assert!(matches!(err, KubeError::Yaml(_)));
    }

    #[test]
    fn test_other_tags_are_dropped() {
        let documents = load_documents("secret: !vault {path: a/b}\n").unwrap();
        assert_eq!(documents[0], json!({"secret": {"path": "a/b"}}));
    }

    #[test]
    fn test_merge_keys_are_resolved() {
        let yaml = "base: &b\n  type: string\nfield:\n  <<: *b\n  description: d\n";
        let documents = load_documents(yaml).unwrap();
        assert_eq!(
            documents[0]["field"],
            json!({"type": "string", "description": "d"})
        );
    }

    #[test]
    fn test_merge_keys_do_not_override_explicit_entries() {
        let yaml = "base: &b\n  type: string\nfield:\n  <<: *b\n  type: integer\n";
        let documents = load_documents(yaml).unwrap();
        assert_eq!(documents[0]["field"], json!({"type": "integer"}));
    }

    #[test]
    fn test_yaml_11_booleans_stay_strings() {
        let documents = load_documents("default: yes
enabled: off
").unwrap();
        assert_eq!(documents[0], json!({"default": "yes", "enabled": "off"}));
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let err = load_documents("a: 1
a: 2
").unwrap_err();
        assert!(matches!(err, KubeError::Yaml(_)));
    }

    #[test]
    fn test_non_finite_number_is_rejected() {
        assert!(load_documents("limit: .inf\n").is_err());
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let err = load_documents("key: [unclosed\n").unwrap_err();
        assert!(matches!(err, KubeError::Yaml(_)));
    }
}
