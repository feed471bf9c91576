use std::collections::HashMap;

use log::debug;

use crate::{
    model::{Collection, Variable},
    reference::Reference,
    ExportOptions,
};

/// Id lookups over one enumeration of the host's variables.
#[derive(Debug, Default)]
pub struct VariableIndex<'a> {
    variables: HashMap<&'a str, &'a Variable>,
    collections: HashMap<&'a str, &'a Collection>,
}
impl<'a> VariableIndex<'a> {
    pub fn new(collections: &'a [Collection], variables: &'a [Variable]) -> Self {
        Self {
            variables: variables.iter().map(|v| (v.id.as_str(), v)).collect(),
            collections: collections.iter().map(|c| (c.id.as_str(), c)).collect(),
        }
    }
    pub fn variable(&self, id: &str) -> Option<&'a Variable> {
        self.variables.get(id).copied()
    }
    pub fn collection(&self, id: &str) -> Option<&'a Collection> {
        self.collections.get(id).copied()
    }
}

/// Builds the placeholder for a reference to `target_id`.
///
/// Each `/` segment of the target's name is normalized and joined with `.`.
/// With `qualify_aliases` the normalized name of the target's collection is
/// prepended. Returns `None` for ids that are not in the index.
pub fn resolve_alias(
    target_id: &str,
    index: &VariableIndex<'_>,
    options: &ExportOptions,
) -> Option<Reference> {
    let Some(target) = index.variable(target_id) else {
        debug!(target_id = target_id; "Dropping reference to unknown variable");
        return None;
    };
    let mut segments = Vec::new();
    if options.qualify_aliases {
        match index.collection(&target.variable_collection_id) {
            Some(collection) => segments.push(options.key(&collection.name)),
            None => debug!(
                target_id = target_id,
                collection_id = target.variable_collection_id.as_str();
                "Referenced variable has no known collection, using a bare path"
            ),
        }
    }
    segments.extend(target.name.split('/').map(|segment| options.key(segment)));
    Some(Reference::new(segments))
}
