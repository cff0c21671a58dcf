//! Error types for crdschema-kube

use thiserror::Error;

/// Result type for crdschema-kube operations
pub type Result<T> = std::result::Result<T, KubeError>;

/// Errors raised while loading CRD manifests and locating their schemas
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KubeError {
    /// Malformed YAML, or YAML that has no JSON equivalent
    #[error("invalid YAML: {0}")]
    Yaml(String),

    /// A CRD with a schema lacks a field needed to name the output file
    #[error("CRD '{crd}' is missing '{field}'")]
    MissingField { crd: String, field: String },

    /// Unusable output filename template
    #[error("invalid filename format '{format}': {message}")]
    FilenameFormat { format: String, message: String },
}

impl From<serde_yaml::Error> for KubeError {
    fn from(e: serde_yaml::Error) -> Self {
        KubeError::Yaml(e.to_string())
    }
}
