//! `figma-tokens` library
//!
//! Wires the token tree builder to variable documents on disk, the
//! configuration file and the output packaging.

mod args;
pub mod config;
mod error;
pub mod package;

pub use args::{Args, Command, ExportArgs};
pub use error::Error;

use std::io::{self, Write};

use log::info;

use figma_design_tokens_core::{
    ExportOptions, Exporter, JsonSource, ModeValue, OutputTree, Reference, Snapshot, VariableSource,
};

use crate::config::AppConfig;

/// Input argument that reads the document from stdin.
pub const STDIN: &str = "-";

/// Run the CLI, printing results to stdout.
pub fn run(args: &Args) -> Result<(), Error> {
    let stdout = io::stdout();
    run_with_output(args, &mut stdout.lock())
}

/// Run the CLI, printing results to `out`.
///
/// # Errors
///
/// Returns [`Error`] for unreadable configuration or input, a failed
/// enumeration, output that cannot be written, and for lookups that find
/// nothing.
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<(), Error> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Export(export) => run_export(export, &app_config, out),
        Command::Find { input, id } => {
            let tree = export_tree(input, app_config.tokens)?;
            let defined = tree.find_path_by_id(id);
            let referenced = tree.find_path_by_reference(id);
            if defined.is_none() && referenced.is_none() {
                return Err(Error::NotFound(format!("No token defines or references `{id}`")));
            }
            writeln!(out, "defined: {}", defined.as_deref().unwrap_or("-"))?;
            writeln!(out, "referenced by: {}", referenced.as_deref().unwrap_or("-"))?;
            Ok(())
        }
        Command::Resolve {
            input,
            reference,
            mode,
        } => {
            let reference = Reference::parse(reference)?;
            let tree = export_tree(input, app_config.tokens)?;
            match tree.resolve(&reference, mode) {
                Some(ModeValue::Hex(hex)) => writeln!(out, "{hex}")?,
                Some(value) => writeln!(out, "{}", serde_json::to_string(value)?)?,
                None => {
                    return Err(Error::NotFound(format!(
                        "`{reference}` does not resolve in mode `{mode}`"
                    )))
                }
            }
            Ok(())
        }
    }
}

fn run_export(export: &ExportArgs, app_config: &AppConfig, out: &mut impl Write) -> Result<(), Error> {
    let exporter = Exporter::new(open_source(&export.input)?, app_config.tokens.clone());
    let full = exporter.export()?;
    let tree = match &export.collection {
        Some(name) => exporter
            .collection(name)?
            .ok_or_else(|| Error::UnknownCollection(name.clone()))?,
        None => OutputTree::clone(&full),
    };

    if export.stdout {
        out.write_all(&package::to_json(&tree)?)?;
        return Ok(());
    }

    let packaging = export.packaging.unwrap_or(app_config.output.packaging);
    let directory = export.out.as_ref().unwrap_or(&app_config.output.directory);
    let artifacts = package::package(&tree, packaging, export.collection.is_some())?;
    let written = package::write_artifacts(directory, &artifacts)?;
    for path in &written {
        writeln!(out, "{}", path.display())?;
    }
    info!(
        packaging:? = packaging,
        directory = directory.display().to_string(),
        files = written.len();
        "Tokens written"
    );
    Ok(())
}

fn open_source(input: &str) -> Result<Box<dyn VariableSource>, Error> {
    if input == STDIN {
        return Ok(Box::new(Snapshot::from_reader(io::stdin().lock())?));
    }
    Ok(Box::new(JsonSource::new(input)))
}

fn export_tree(input: &str, options: ExportOptions) -> Result<OutputTree, Error> {
    let exporter = Exporter::new(open_source(input)?, options);
    let tree = exporter.export()?;
    Ok(OutputTree::clone(&tree))
}
