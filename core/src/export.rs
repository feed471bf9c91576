use std::sync::Arc;

use log::info;
use thiserror::Error;

use crate::{
    build,
    cache::ExportCache,
    source::{Snapshot, SourceError},
    tree::OutputTree,
    ExportOptions, VariableSource,
};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to enumerate variables: {0}")]
    Source(#[from] SourceError),
}

/// Builds token trees from a source and keeps the last one for sub-views.
#[derive(Debug)]
pub struct Exporter<S> {
    source: S,
    options: ExportOptions,
    cache: ExportCache,
}
impl<S: VariableSource> Exporter<S> {
    pub fn new(source: S, options: ExportOptions) -> Self {
        Self {
            source,
            options,
            cache: ExportCache::new(),
        }
    }

    /// Enumerates the source and builds a fresh tree, replacing the cached one.
    ///
    /// A failed enumeration leaves the cache untouched.
    pub fn export(&self) -> Result<Arc<OutputTree>, ExportError> {
        let Snapshot {
            collections,
            variables,
        } = self.source.snapshot()?;
        let tree = build(&collections, &variables, &self.options);
        info!(collections = tree.len(), variables = variables.len(); "Exported variables");
        Ok(self.cache.replace(tree))
    }

    /// One collection's tree, from the cached export when there is one.
    pub fn collection(&self, name: &str) -> Result<Option<OutputTree>, ExportError> {
        if self.cache.latest().is_none() {
            self.export()?;
        }
        Ok(self.cache.collection(name))
    }

    pub fn latest(&self) -> Option<Arc<OutputTree>> {
        self.cache.latest()
    }
}
