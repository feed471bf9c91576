//! Builds nested design-token trees from Figma variables.
//!
//! Variables are grouped by collection, their `/`-delimited names become
//! nested groups, and every per-mode value is resolved to a hex color, a
//! `{dotted.path}` reference or the literal itself.

use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, warn};
use serde::Deserialize;

pub mod alias;
pub mod cache;
pub mod color;
pub mod export;
pub mod model;
pub mod modes;
pub mod normalize;
pub mod reference;
pub mod source;
pub mod tree;
pub mod value;

pub use alias::VariableIndex;
pub use cache::ExportCache;
pub use export::{ExportError, Exporter};
pub use model::{Collection, Mode, Variable};
pub use modes::ModeValue;
pub use normalize::KeyCase;
pub use reference::{Reference, ReferenceError};
pub use source::{JsonSource, Snapshot, SourceError, VariableSource};
pub use tree::{Group, Insertion, OutputTree, Token, TokenOrGroup};
pub use value::{RawValue, ValueType};

/// Knobs for key naming and value rendering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub key_case: KeyCase,
    /// Fold accented letters to ASCII before normalizing keys.
    pub transliterate: bool,
    /// Prefix references with the target's collection key.
    pub qualify_aliases: bool,
    pub uppercase_hex: bool,
    /// Mode id to output label, used verbatim in place of the mode's name.
    pub mode_labels: IndexMap<String, String>,
}
impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            key_case: KeyCase::Camel,
            transliterate: false,
            qualify_aliases: true,
            uppercase_hex: false,
            mode_labels: IndexMap::new(),
        }
    }
}
impl ExportOptions {
    pub fn key(&self, raw: &str) -> String {
        normalize::normalize_with(raw, self.key_case, self.transliterate)
    }
}

/// Builds the token tree of every collection.
///
/// Collections without variables still get an (empty) entry. Variables whose
/// collection is not listed are skipped.
pub fn build(collections: &[Collection], variables: &[Variable], options: &ExportOptions) -> OutputTree {
    let index = VariableIndex::new(collections, variables);
    let mut members = variables
        .iter()
        .into_group_map_by(|variable| variable.variable_collection_id.as_str());
    let mut output = OutputTree::default();

    for collection in collections {
        let collection_key = options.key(&collection.name);
        let root = output.collection_mut(&collection_key, &collection.name);
        let owned = members.remove(collection.id.as_str()).unwrap_or_default();
        debug!(collection = collection.name.as_str(), variables = owned.len(); "Building collection");

        for variable in owned {
            let values_by_mode = modes::resolve_modes(variable, &collection.modes, &index, options);
            let token = Token {
                id: variable.id.clone(),
                type_: representative_type(variable, &collection.modes),
                values_by_mode,
            };
            let mut path = variable.name.split('/').map(|segment| options.key(segment)).collect_vec();
            let key = path.pop().unwrap_or_default();
            if let Insertion::Replaced(previous) = root.insert(&path, key.clone(), token) {
                path.push(key);
                warn!(
                    collection = collection_key.as_str(),
                    path = path.join(".").as_str(),
                    variable = variable.id.as_str(),
                    replaced = describe(&previous).as_str();
                    "Token path already taken, keeping the later variable"
                );
            }
        }
    }

    for (collection_id, orphans) in members {
        debug!(collection_id = collection_id, variables = orphans.len(); "Skipping variables of unknown collection");
    }
    output
}

/// Type of the value for the first collection mode the variable defines,
/// or the host's resolved type when it defines none.
fn representative_type(variable: &Variable, modes: &[Mode]) -> ValueType {
    modes
        .iter()
        .find_map(|mode| variable.values_by_mode.get(&mode.mode_id))
        .map_or(variable.resolved_type, RawValue::value_type)
}

fn describe(node: &TokenOrGroup) -> String {
    match node {
        TokenOrGroup::Token(token) => token.id.clone(),
        TokenOrGroup::Group(group) => format!("group of {}", group.len()),
    }
}
