use std::sync::{Arc, PoisonError, RwLock};

use crate::tree::OutputTree;

/// The most recent export, shared read-only between readers.
///
/// A new export replaces the whole tree; a stored tree is never mutated.
#[derive(Debug, Default)]
pub struct ExportCache {
    latest: RwLock<Option<Arc<OutputTree>>>,
}
impl ExportCache {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn replace(&self, tree: OutputTree) -> Arc<OutputTree> {
        let tree = Arc::new(tree);
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&tree));
        tree
    }
    pub fn latest(&self) -> Option<Arc<OutputTree>> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
    /// Sub-view of one collection of the cached tree.
    pub fn collection(&self, name: &str) -> Option<OutputTree> {
        self.latest()?.select(name)
    }
}
