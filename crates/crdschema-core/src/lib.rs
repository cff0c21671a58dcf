//! crdschema core - schema transforms for CRD to JSON Schema conversion
//!
//! This crate holds the pure part of crdschema:
//! - `transform`: recursive rewrites over `serde_json::Value` trees
//! - `pipeline`: the fixed transform order, JSON rendering and file output
//!
//! # Transforms
//!
//! | Transform                         | Effect                                           |
//! |-----------------------------------|--------------------------------------------------|
//! | `add_additional_properties_false` | closes objects that declare `properties`         |
//! | `replace_int_or_string`           | `format: int-or-string` becomes a `oneOf`        |
//! | `allow_null_optional_fields`      | widens `type` to `[type, "null"]` (opt-in only)  |
//!
//! Note that `replace_int_or_string` replaces the *whole* mapping carrying
//! `format: int-or-string`, including any `description` or other siblings.
//! Kubernetes' own OpenAPI to JSON Schema tooling behaves the same way.
//!
//! # Example
//!
//! ```
//! use crdschema_core::{RenderOptions, render_schema};
//! use serde_json::json;
//!
//! let schema = json!({"properties": {"spec": {"properties": {}}}});
//! let rendered = render_schema(&schema, RenderOptions::default()).unwrap();
//! assert!(rendered.contains("\"additionalProperties\": false"));
//! ```

pub mod error;
pub mod pipeline;
pub mod transform;

pub use error::{CoreError, Result};
pub use pipeline::{RenderOptions, render_schema, transform_schema, write_schema_file};
pub use transform::{
    add_additional_properties_false, allow_null_optional_fields, replace_int_or_string,
};
