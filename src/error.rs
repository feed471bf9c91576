use std::io;

use thiserror::Error;

use figma_design_tokens_core::{ExportError, ReferenceError, SourceError};

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error("Failed to serialize tokens: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("{0}")]
    NotFound(String),
}
