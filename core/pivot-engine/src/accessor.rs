//! FILENAME: core/pivot-engine/src/accessor.rs
//! Field access - how the engine reads named fields from caller records.
//!
//! The engine is generic over the record type. Callers inject a
//! `FieldAccessor` that maps `(record, field name)` to a `FieldValue`.
//! Any closure `Fn(&R, &str) -> FieldValue` is an accessor, and
//! `NamedFields` covers the common map-like record shapes.

use std::collections::HashMap;
use std::hash::BuildHasher;
use crate::value::FieldValue;

/// Reads a named field from a record.
/// Missing fields must come back as `FieldValue::Empty`, never panic.
pub trait FieldAccessor<R: ?Sized> {
    fn field(&self, record: &R, name: &str) -> FieldValue;
}

impl<R: ?Sized, F> FieldAccessor<R> for F
where
    F: Fn(&R, &str) -> FieldValue,
{
    fn field(&self, record: &R, name: &str) -> FieldValue {
        self(record, name)
    }
}

/// Accessor for records that are already keyed by field name.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamedFields;

impl<S: BuildHasher> FieldAccessor<HashMap<String, FieldValue, S>> for NamedFields {
    fn field(&self, record: &HashMap<String, FieldValue, S>, name: &str) -> FieldValue {
        record.get(name).cloned().unwrap_or(FieldValue::Empty)
    }
}

impl FieldAccessor<serde_json::Value> for NamedFields {
    fn field(&self, record: &serde_json::Value, name: &str) -> FieldValue {
        record.get(name).map(json_to_field_value).unwrap_or(FieldValue::Empty)
    }
}

impl FieldAccessor<serde_json::Map<String, serde_json::Value>> for NamedFields {
    fn field(&self, record: &serde_json::Map<String, serde_json::Value>, name: &str) -> FieldValue {
        record.get(name).map(json_to_field_value).unwrap_or(FieldValue::Empty)
    }
}

/// Converts a JSON scalar to a field value. Nested values are not readable.
pub fn json_to_field_value(value: &serde_json::Value) -> FieldValue {
    match value {
        serde_json::Value::Number(n) => n.as_f64().map_or(FieldValue::Empty, FieldValue::number),
        serde_json::Value::String(s) => FieldValue::Text(s.clone()),
        serde_json::Value::Bool(b) => FieldValue::Boolean(*b),
        serde_json::Value::Null
        | serde_json::Value::Array(_)
        | serde_json::Value::Object(_) => FieldValue::Empty,
    }
}
