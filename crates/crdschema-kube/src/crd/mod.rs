//! CRD (CustomResourceDefinition) schema extraction
//!
//! - **Loading** (`loader`): multi-document YAML to `serde_json::Value`
//! - **Extraction** (`extract`): find CRDs and their per-version schemas
//!
//! ```text
//! YAML text ──► load_documents ──► collect_crds ──► ExtractedSchema per version
//! ```
//!
//! # Example
//!
//! ```
//! use crdschema_kube::FilenameTemplate;
//! use crdschema_kube::crd::extract_from_str;
//!
//! let yaml = r#"
//! kind: CustomResourceDefinition
//! spec:
//!   group: example.com
//!   names:
//!     kind: Widget
//!   versions:
//!     - name: v1
//!       schema:
//!         openAPIV3Schema:
//!           type: object
//! "#;
//!
//! let schemas = extract_from_str(yaml, &FilenameTemplate::default()).unwrap();
//! assert_eq!(schemas[0].file_name, "widget_v1.json");
//! ```

mod extract;
mod loader;

pub use extract::{CRD_KIND, ExtractedSchema, collect_crds, extract_from_str, extract_schemas};
pub use loader::{load_documents, yaml_to_json};
