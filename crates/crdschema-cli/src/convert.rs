//! Convert command - write one JSON Schema per CRD version
//!
//! Inputs are handled strictly in order: each command-line input is
//! resolved, each resolved source is read and fully extracted, then its
//! schemas are written. The first error stops the run.

use console::style;
use crdschema_core::write_schema_file;
use crdschema_kube::extract_from_str;

use crate::error::{CliError, Result};
use crate::input::{InputReader, InputSource, resolve_input};
use crate::settings::Settings;

/// Counters reported at the end of a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Files and URLs read
    pub sources: usize,
    /// JSON Schema files written
    pub schemas: usize,
}

pub fn run(inputs: &[String], settings: &Settings) -> Result<ConvertSummary> {
    let mut reader = InputReader::new(settings.insecure);
    let mut summary = ConvertSummary::default();

    for input in inputs {
        for source in resolve_input(input)? {
            summary.schemas += convert_source(&mut reader, &source, settings)?;
            summary.sources += 1;
        }
    }

    println!(
        "{} Processed {} files.",
        style("Processing complete.").green().bold(),
        summary.sources
    );

    Ok(summary)
}

fn convert_source(
    reader: &mut InputReader,
    source: &InputSource,
    settings: &Settings,
) -> Result<usize> {
    println!("Processing {}...", style(source).cyan());

    let text = reader.read(source)?;
    let schemas =
        extract_from_str(&text, &settings.template).map_err(|e| CliError::extraction(source, e))?;

    if schemas.is_empty() {
        tracing::debug!(source = %source, "no CRD schemas found");
    }

    for schema in &schemas {
        let path = write_schema_file(
            &schema.schema,
            &schema.file_name,
            &settings.output_dir,
            settings.render,
        )?;
        tracing::debug!(kind = %schema.kind, version = %schema.version, "converted schema");
        println!("JSON schema written to {}", style(path.display()).green());
    }

    Ok(schemas.len())
}
