//! crdschema-kube - Kubernetes manifest handling for crdschema
//!
//! Turns CustomResourceDefinition manifests into the raw OpenAPI v3 schemas
//! they carry, one per (kind, version), together with the output file name
//! each schema should be written to.

pub mod crd;
pub mod error;
pub mod naming;

pub use crd::{ExtractedSchema, extract_from_str};
pub use error::{KubeError, Result};
pub use naming::{DEFAULT_FILENAME_FORMAT, FilenameFields, FilenameTemplate};
