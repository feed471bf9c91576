use csscolorparser::Color;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

const ALIAS_MARKER: &str = "VARIABLE_ALIAS";

/// Coarse category of a value, written as the `type` of every token.
///
/// Deserializing also accepts the host's `resolvedType` spellings
/// (`COLOR`, `FLOAT`, `STRING`, `BOOLEAN`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    #[serde(alias = "COLOR")]
    Color,
    #[serde(alias = "VARIABLE_ALIAS")]
    Alias,
    #[serde(alias = "FLOAT")]
    Number,
    #[serde(alias = "STRING")]
    String,
    #[serde(alias = "BOOLEAN")]
    Boolean,
    #[default]
    #[serde(other)]
    Other,
}

/// A per-mode value as supplied by the host, classified once on ingestion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RawValue {
    Color(Color),
    /// Id of the referenced variable.
    Alias(String),
    Number(Number),
    String(String),
    Boolean(bool),
    /// Anything else, kept untouched.
    Other(Value),
}
impl RawValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            RawValue::Color(_) => ValueType::Color,
            RawValue::Alias(_) => ValueType::Alias,
            RawValue::Number(_) => ValueType::Number,
            RawValue::String(_) => ValueType::String,
            RawValue::Boolean(_) => ValueType::Boolean,
            RawValue::Other(_) => ValueType::Other,
        }
    }
    pub fn color(r: f64, g: f64, b: f64) -> Self {
        RawValue::Color(Color { r, g, b, a: 1.0 })
    }
    pub fn alias(id: impl Into<String>) -> Self {
        RawValue::Alias(id.into())
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(number) => RawValue::Number(number),
            Value::String(string) => RawValue::String(string),
            Value::Bool(boolean) => RawValue::Boolean(boolean),
            Value::Object(map) => classify_object(&map).unwrap_or(RawValue::Other(Value::Object(map))),
            other => RawValue::Other(other),
        }
    }
}

/// Structural classification of a raw JSON value.
pub fn classify(value: &Value) -> ValueType {
    match value {
        Value::Number(_) => ValueType::Number,
        Value::String(_) => ValueType::String,
        Value::Bool(_) => ValueType::Boolean,
        Value::Object(map) => classify_object(map).map_or(ValueType::Other, |raw| raw.value_type()),
        Value::Null | Value::Array(_) => ValueType::Other,
    }
}

fn classify_object(map: &Map<String, Value>) -> Option<RawValue> {
    let channel = |name: &str| map.get(name).and_then(Value::as_f64);
    if let (Some(r), Some(g), Some(b)) = (channel("r"), channel("g"), channel("b")) {
        let a = channel("a").unwrap_or(1.0);
        return Some(RawValue::Color(Color { r, g, b, a }));
    }
    let marker = map.get("type").or_else(|| map.get("$type")).and_then(Value::as_str);
    let id = map.get("id").or_else(|| map.get("$id")).and_then(Value::as_str);
    match (marker, id) {
        (None, Some(id)) => Some(RawValue::Alias(id.to_string())),
        (Some(marker), Some(id)) if marker == ALIAS_MARKER => Some(RawValue::Alias(id.to_string())),
        _ => None,
    }
}
