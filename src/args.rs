//! Command-line argument definitions for the `figma-tokens` tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::package::Packaging;

/// Export Figma variables as nested design-token JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the token tree and write it out
    Export(ExportArgs),

    /// Show where a variable lives and which token references it
    Find {
        /// Variables document, or `-` for stdin
        input: String,

        /// Variable id, e.g. `VariableID:1:4`
        #[arg(long)]
        id: String,
    },

    /// Follow a reference to its literal value
    Resolve {
        /// Variables document, or `-` for stdin
        input: String,

        /// Reference placeholder, e.g. `{referenceColors.neutral.900}`
        #[arg(long)]
        reference: String,

        /// Mode key as it appears in the output, e.g. `base`
        #[arg(long)]
        mode: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Variables document, or `-` for stdin
    pub input: String,

    /// How to split the output into files
    #[arg(short, long, value_enum)]
    pub packaging: Option<Packaging>,

    /// Only export this collection (key or display name)
    #[arg(long)]
    pub collection: Option<String>,

    /// Output directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the JSON instead of writing files
    #[arg(long)]
    pub stdout: bool,
}
