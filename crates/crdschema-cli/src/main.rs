//! crdschema CLI - convert Kubernetes CRD schemas to standalone JSON Schema

use clap::{CommandFactory, Parser};
use crdschema_kube::DEFAULT_FILENAME_FORMAT;
use std::path::PathBuf;

mod convert;
mod error;
mod exit_codes;
mod input;
mod logging;
mod settings;

use error::Result;
use settings::{Options, Settings};

#[derive(Parser)]
#[command(name = "crdschema")]
#[command(version)]
#[command(
    about = "Convert Kubernetes CRD OpenAPI v3 schemas into standalone JSON Schema files",
    long_about = None
)]
#[command(after_help = "\
Environment:
  FILENAME_FORMAT                  Output name template ({kind}, {version}, {group}, {fullgroup})
  DENY_ROOT_ADDITIONAL_PROPERTIES  When non-empty, also close the root schema
  DISABLE_SSL_CERT_VALIDATION      When set, skip TLS certificate checks for URLs (dangerous)")]
struct Cli {
    /// CRD files, directories of *.yaml/*.yml files, or http(s) URLs
    inputs: Vec<String>,

    /// Directory to write the JSON Schema files to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Output file name template
    #[arg(long, env = "FILENAME_FORMAT", default_value = DEFAULT_FILENAME_FORMAT)]
    filename_format: String,

    /// Set `additionalProperties: false` on the root schema as well
    #[arg(long)]
    deny_root_additional_properties: bool,

    /// Widen `type` of fields not covered by `required` to also accept null
    #[arg(long)]
    allow_null_optional_fields: bool,

    /// Accept invalid TLS certificates for URL inputs (dangerous)
    #[arg(long)]
    insecure: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    logging::setup_logging(cli.debug);

    if cli.inputs.is_empty() {
        eprintln!("Missing input parameter.");
        eprintln!("{}", Cli::command().render_usage());
        std::process::exit(exit_codes::ERROR);
    }

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env(Options {
        output_dir: cli.output_dir,
        filename_format: cli.filename_format,
        deny_root_additional_properties: cli.deny_root_additional_properties,
        allow_null_optional_fields: cli.allow_null_optional_fields,
        insecure: cli.insecure,
    })?;

    let summary = convert::run(&cli.inputs, &settings)?;
    tracing::debug!(sources = summary.sources, schemas = summary.schemas, "run complete");

    Ok(())
}
