//! Run configuration
//!
//! Flags and environment variables are folded into a single [`Settings`]
//! value once at startup; nothing below `main` reads the environment.
//!
//! | Variable                          | Flag                                 | Effect                          |
//! |-----------------------------------|--------------------------------------|---------------------------------|
//! | `FILENAME_FORMAT`                 | `--filename-format`                  | output file name template       |
//! | `DENY_ROOT_ADDITIONAL_PROPERTIES` | `--deny-root-additional-properties`  | close the root schema too       |
//! | `DISABLE_SSL_CERT_VALIDATION`     | `--insecure`                         | skip TLS verification for URLs  |

use std::ffi::OsString;
use std::path::PathBuf;

use crdschema_core::RenderOptions;
use crdschema_kube::FilenameTemplate;

use crate::error::{CliError, Result};

pub const DENY_ROOT_ENV: &str = "DENY_ROOT_ADDITIONAL_PROPERTIES";
pub const DISABLE_SSL_ENV: &str = "DISABLE_SSL_CERT_VALIDATION";

/// Raw option values as parsed from the command line
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub output_dir: PathBuf,
    pub filename_format: String,
    pub deny_root_additional_properties: bool,
    pub allow_null_optional_fields: bool,
    pub insecure: bool,
}

/// Everything a conversion run needs to know
#[derive(Debug, Clone)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub template: FilenameTemplate,
    pub render: RenderOptions,
    /// Accept any TLS certificate for URL inputs
    pub insecure: bool,
}

impl Settings {
    /// Build settings from options and the process environment
    pub fn from_env(options: Options) -> Result<Self> {
        Self::resolve(options, |name| std::env::var_os(name))
    }

    /// Build settings from options and an arbitrary variable lookup
    ///
    /// `DENY_ROOT_ADDITIONAL_PROPERTIES` counts only when non-empty, while
    /// `DISABLE_SSL_CERT_VALIDATION` counts as soon as it is present.
    pub fn resolve(options: Options, env: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let template =
            FilenameTemplate::parse(&options.filename_format).map_err(CliError::config)?;

        let deny_root = options.deny_root_additional_properties
            || env(DENY_ROOT_ENV).is_some_and(|value| !value.is_empty());
        let insecure = options.insecure || env(DISABLE_SSL_ENV).is_some();

        Ok(Self {
            output_dir: options.output_dir,
            template,
            render: RenderOptions {
                deny_root_additional_properties: deny_root,
                allow_null_optional_fields: options.allow_null_optional_fields,
            },
            insecure,
        })
    }
}
