//! Recursive tree transforms over schema nodes
//!
//! Every transform here is total: any JSON-shaped input is accepted and
//! shapes a transform does not care about pass through untouched. Inputs are
//! borrowed and a fresh tree is returned, so callers can keep the original.

use serde_json::{Map, Value, json};

/// Close every object schema that declares `properties`.
///
/// Any mapping holding a `properties` key and no `additionalProperties` key
/// gets `additionalProperties: false` appended. With `skip_top` the root
/// mapping is left open; nested mappings are always closed. This mirrors what
/// `kubectl` does when it validates objects against a CRD schema.
pub fn add_additional_properties_false(node: &Value, skip_top: bool) -> Value {
    let mut closed = node.clone();
    close_objects(&mut closed, skip_top);
    closed
}

fn close_objects(node: &mut Value, skip: bool) {
    match node {
        Value::Object(map) => {
            if !skip && map.contains_key("properties") && !map.contains_key("additionalProperties")
            {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            for child in map.values_mut() {
                close_objects(child, false);
            }
        }
        Value::Array(items) => {
            for item in items {
                close_objects(item, false);
            }
        }
        _ => {}
    }
}

/// Rewrite Kubernetes `int-or-string` fields into a JSON Schema `oneOf`.
///
/// A mapping whose `format` is exactly `"int-or-string"` is replaced as a
/// whole by `{"oneOf": [{"type": "string"}, {"type": "integer"}]}`. Sibling
/// keys such as `description` or `x-kubernetes-int-or-string` are dropped,
/// matching the upstream Kubernetes tooling.
pub fn replace_int_or_string(node: &Value) -> Value {
    match node {
        Value::Object(map) if is_int_or_string(map) => int_or_string_schema(),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), replace_int_or_string(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(replace_int_or_string).collect()),
        scalar => scalar.clone(),
    }
}

fn is_int_or_string(map: &Map<String, Value>) -> bool {
    map.get("format").and_then(Value::as_str) == Some("int-or-string")
}

fn int_or_string_schema() -> Value {
    json!({
        "oneOf": [
            {"type": "string"},
            {"type": "integer"}
        ]
    })
}

/// Where a node sits in the tree, as seen by [`allow_null_optional_fields`].
#[derive(Debug, Clone, Copy, Default)]
struct Ancestry<'a> {
    parent: Option<&'a Value>,
    grandparent: Option<&'a Value>,
    key: Option<&'a str>,
}

/// Let non-required fields accept `null`.
///
/// Every string reached under a `type` key (other than `"null"` itself) is
/// widened to `[type, "null"]` unless the grandparent of the mapping holding
/// it carries a `required` key. The check looks at whichever ancestor sits two
/// levels up, not at the object whose `required` list actually names the
/// field, so it can loosen fields that are required one level down.
///
/// Mappings inside sequences are visited with the sequence as their parent.
/// Scalars and nested sequences directly inside a sequence are left alone.
///
/// This is not part of the default pipeline; see
/// [`RenderOptions::allow_null_optional_fields`](crate::RenderOptions).
pub fn allow_null_optional_fields(node: &Value) -> Value {
    widen_optional(node, Ancestry::default())
}

fn widen_optional<'a>(node: &'a Value, ctx: Ancestry<'a>) -> Value {
    let Value::Object(map) = node else {
        return node.clone();
    };

    let enclosing_required = ctx.grandparent.is_some_and(has_required);

    let widened = map
        .iter()
        .map(|(key, value)| {
            let child = Ancestry {
                parent: Some(node),
                grandparent: ctx.parent,
                key: Some(key.as_str()),
            };
            let new_value = match value {
                Value::Object(_) => widen_optional(value, child),
                Value::Array(items) => {
                    let element = Ancestry {
                        parent: Some(value),
                        ..child
                    };
                    Value::Array(
                        items
                            .iter()
                            .map(|item| widen_optional(item, element))
                            .collect(),
                    )
                }
                Value::String(ty) if key == "type" && ty != "null" && !enclosing_required => {
                    tracing::trace!(
                        under = ctx.key.unwrap_or("<root>"),
                        ty = %ty,
                        "allowing null for optional field"
                    );
                    json!([ty, "null"])
                }
                other => other.clone(),
            };
            (key.clone(), new_value)
        })
        .collect();

    Value::Object(widened)
}

fn has_required(node: &Value) -> bool {
    match node {
        Value::Object(map) => map.contains_key("required"),
        Value::Array(items) => items.iter().any(|item| item.as_str() == Some("required")),
        _ => false,
    }
}
