//! CLI error types with exit code handling
//!
//! Every failure is fatal: the first error stops the batch and is rendered
//! by miette before the process exits with the matching code.

use std::path::Path;

use crdschema_core::CoreError;
use crdschema_kube::KubeError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Input path missing or unreadable
    #[error("Input error: {message}")]
    #[diagnostic(code(crdschema::cli::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// URL input could not be fetched
    #[error("Failed to fetch {url}: {message}")]
    #[diagnostic(code(crdschema::cli::network))]
    Network {
        url: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Malformed YAML in an input
    #[error("Failed to parse {input}: {message}")]
    #[diagnostic(code(crdschema::cli::yaml))]
    Yaml { input: String, message: String },

    /// CRD with a schema but without the fields needed to name its output
    #[error("Invalid CRD in {input}: {message}")]
    #[diagnostic(
        code(crdschema::cli::schema),
        help("CRDs need spec.group, spec.names.kind and a version name to be converted")
    )]
    SchemaShape { input: String, message: String },

    /// Invalid option value
    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(crdschema::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error while writing output
    #[error("IO error: {message}")]
    #[diagnostic(code(crdschema::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(crdschema::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input { .. } => exit_codes::INPUT_ERROR,
            CliError::Network { .. } => exit_codes::NETWORK_ERROR,
            CliError::Yaml { .. } => exit_codes::YAML_ERROR,
            CliError::SchemaShape { .. } => exit_codes::SCHEMA_ERROR,
            CliError::Config { .. } => exit_codes::USAGE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an input error for a path that could not be read
    pub fn input_io(path: &Path, err: std::io::Error) -> Self {
        let help = match err.kind() {
            std::io::ErrorKind::NotFound => {
                Some("Inputs must be files, directories or http(s):// URLs".to_string())
            }
            _ => None,
        };
        Self::Input {
            message: format!("{}: {}", path.display(), err),
            help,
        }
    }

    /// Create a network error from a failed request
    pub fn network(url: &str, err: reqwest::Error) -> Self {
        let hint = "Check the URL, or set DISABLE_SSL_CERT_VALIDATION for self-signed certificates";
        let help = err.is_connect().then(|| hint.to_string());
        Self::Network {
            url: url.to_string(),
            message: err.to_string(),
            help,
        }
    }

    /// Attach the input name to an extraction error
    pub fn extraction(input: impl std::fmt::Display, err: KubeError) -> Self {
        match err {
            KubeError::Yaml(message) => Self::Yaml {
                input: input.to_string(),
                message,
            },
            KubeError::MissingField { .. } => Self::SchemaShape {
                input: input.to_string(),
                message: err.to_string(),
            },
            KubeError::FilenameFormat { .. } => Self::config(err),
            other => Self::internal(other.to_string()),
        }
    }

    /// Create a configuration error listing the filename placeholders
    pub fn config(err: KubeError) -> Self {
        Self::Config {
            message: err.to_string(),
            help: Some(
                "FILENAME_FORMAT accepts {kind}, {version}, {group} and {fullgroup}".to_string(),
            ),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io(e) => CliError::Io {
                message: e.to_string(),
            },
            other => CliError::internal(other.to_string()),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
