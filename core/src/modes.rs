use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{
    alias::{resolve_alias, VariableIndex},
    color::to_hex,
    model::{Mode, Variable},
    reference::Reference,
    value::RawValue,
    ExportOptions,
};

/// A resolved per-mode value as it appears in the output tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeValue {
    Hex(String),
    /// Serialized as the placeholder; `target` keeps the referenced id.
    Alias { target: String, reference: Reference },
    Literal(Value),
}
impl ModeValue {
    pub fn references(&self, id: &str) -> bool {
        matches!(self, ModeValue::Alias { target, .. } if target == id)
    }
}
impl Serialize for ModeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ModeValue::Hex(hex) => serializer.serialize_str(hex),
            ModeValue::Alias { reference, .. } => serializer.collect_str(reference),
            ModeValue::Literal(value) => value.serialize(serializer),
        }
    }
}

/// Name of a mode's key in `valuesByMode`.
///
/// An entry in `mode_labels` for the mode id wins and is used verbatim;
/// otherwise the mode's name (or id) is normalized.
pub fn mode_key(mode: &Mode, options: &ExportOptions) -> String {
    match options.mode_labels.get(&mode.mode_id) {
        Some(label) => label.clone(),
        None => options.key(mode.label()),
    }
}

/// Resolves `variable`'s values for each of the collection's modes.
///
/// Modes the variable has no value for, and references to unknown
/// variables, are left out of the result.
pub fn resolve_modes(
    variable: &Variable,
    modes: &[Mode],
    index: &VariableIndex<'_>,
    options: &ExportOptions,
) -> IndexMap<String, ModeValue> {
    let mut resolved = IndexMap::with_capacity(modes.len());
    for mode in modes {
        let Some(raw) = variable.values_by_mode.get(&mode.mode_id) else {
            debug!(variable = variable.name.as_str(), mode = mode.label(); "No value for mode");
            continue;
        };
        let value = match raw {
            RawValue::Alias(target) => match resolve_alias(target, index, options) {
                Some(reference) => ModeValue::Alias {
                    target: target.clone(),
                    reference,
                },
                None => continue,
            },
            RawValue::Color(color) => {
                let hex = to_hex(color);
                ModeValue::Hex(if options.uppercase_hex {
                    hex.to_ascii_uppercase()
                } else {
                    hex
                })
            }
            RawValue::Number(number) => ModeValue::Literal(Value::Number(number.clone())),
            RawValue::String(string) => ModeValue::Literal(Value::String(string.clone())),
            RawValue::Boolean(boolean) => ModeValue::Literal(Value::Bool(*boolean)),
            RawValue::Other(other) => ModeValue::Literal(other.clone()),
        };
        let key = mode_key(mode, options);
        if resolved.insert(key.clone(), value).is_some() {
            warn!(
                variable = variable.name.as_str(),
                mode_id = mode.mode_id.as_str(),
                key = key.as_str();
                "Mode key already used by another mode, replacing its value"
            );
        }
    }
    resolved
}
