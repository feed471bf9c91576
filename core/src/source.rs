//! Host collaborators that enumerate collections and variables.

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::{Collection, Variable};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid variables document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Variable source unavailable: {0}")]
    Unavailable(String),
}

/// Something that can list the host's variable collections and variables.
///
/// Any error is fatal to the export that asked for it.
pub trait VariableSource {
    fn collections(&self) -> Result<Vec<Collection>, SourceError>;
    fn variables(&self) -> Result<Vec<Variable>, SourceError>;

    /// Both lists taken from one consistent view of the host.
    fn snapshot(&self) -> Result<Snapshot, SourceError> {
        Ok(Snapshot::new(self.collections()?, self.variables()?))
    }
}

impl<S: VariableSource + ?Sized> VariableSource for Box<S> {
    fn collections(&self) -> Result<Vec<Collection>, SourceError> {
        (**self).collections()
    }
    fn variables(&self) -> Result<Vec<Variable>, SourceError> {
        (**self).variables()
    }
    fn snapshot(&self) -> Result<Snapshot, SourceError> {
        (**self).snapshot()
    }
}

/// An in-memory enumeration, in the shape a plugin snapshot is written.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Snapshot {
    pub collections: Vec<Collection>,
    pub variables: Vec<Variable>,
}
impl Snapshot {
    pub fn new(collections: Vec<Collection>, variables: Vec<Variable>) -> Self {
        Self {
            collections,
            variables,
        }
    }

    /// Reads either a plugin snapshot or a REST `variables/local` response.
    ///
    /// A document with a `meta` key is a REST response and must parse as
    /// one; anything else must be a complete snapshot.
    pub fn from_reader(reader: impl Read) -> Result<Self, SourceError> {
        let mut document: Value = serde_json::from_reader(reader)?;
        match document.get_mut("meta").map(Value::take) {
            Some(meta) => Ok(serde_json::from_value::<RestMeta>(meta)?.into()),
            None => Ok(serde_json::from_value(document)?),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        debug!(path = path.display().to_string(); "Reading variables document");
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}
impl VariableSource for Snapshot {
    fn collections(&self) -> Result<Vec<Collection>, SourceError> {
        Ok(self.collections.clone())
    }
    fn variables(&self) -> Result<Vec<Variable>, SourceError> {
        Ok(self.variables.clone())
    }
    fn snapshot(&self) -> Result<Snapshot, SourceError> {
        Ok(self.clone())
    }
}

/// A variables document on disk, read afresh for every export.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}
impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}
impl VariableSource for JsonSource {
    fn collections(&self) -> Result<Vec<Collection>, SourceError> {
        Ok(self.snapshot()?.collections)
    }
    fn variables(&self) -> Result<Vec<Variable>, SourceError> {
        Ok(self.snapshot()?.variables)
    }
    fn snapshot(&self) -> Result<Snapshot, SourceError> {
        Snapshot::from_path(&self.path)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestMeta {
    variable_collections: IndexMap<String, Collection>,
    variables: IndexMap<String, Variable>,
}

impl From<RestMeta> for Snapshot {
    fn from(meta: RestMeta) -> Self {
        Snapshot {
            collections: meta.variable_collections.into_values().collect(),
            variables: meta.variables.into_values().collect(),
        }
    }
}
