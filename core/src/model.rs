use indexmap::IndexMap;
use serde::Deserialize;

use crate::value::{RawValue, ValueType};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    #[serde(default)]
    pub name: Option<String>,
}
impl Mode {
    pub fn new(mode_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mode_id: mode_id.into(),
            name: Some(name.into()),
        }
    }
    /// Human name of the mode, or its id when the host gave none.
    pub fn label(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.mode_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub modes: Vec<Mode>,
}
impl Collection {
    pub fn new(id: impl Into<String>, name: impl Into<String>, modes: Vec<Mode>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            modes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    /// Slash-delimited path, e.g. `neutral/50`.
    pub name: String,
    pub variable_collection_id: String,
    #[serde(default)]
    pub resolved_type: ValueType,
    #[serde(default)]
    pub values_by_mode: IndexMap<String, RawValue>,
}
impl Variable {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        variable_collection_id: impl Into<String>,
        resolved_type: ValueType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variable_collection_id: variable_collection_id.into(),
            resolved_type,
            values_by_mode: IndexMap::new(),
        }
    }
    pub fn with_value(mut self, mode_id: impl Into<String>, value: RawValue) -> Self {
        self.values_by_mode.insert(mode_id.into(), value);
        self
    }
}
