//! Event trees and schema inference.
//!
//! An [`Event`] is the typed representation of one ingested payload: each
//! top-level key becomes an [`EventField`], and nested objects recurse into
//! child field lists. [`Event::infer_schema`] walks the tree back out into a
//! draft-07-shaped JSON Schema mapping, which is what the validator compares
//! against a reference schema.

use serde_json::{Map, Value, json};

use crate::error::{Error, Result};
use crate::type_map::FieldType;

/// `$schema` URI emitted by inference.
pub const SCHEMA_URI: &str = "http://json-schema.org/draft-07/schema";

/// `$id` URI emitted for the root of an inferred schema.
pub const ROOT_ID: &str = "http://example.com/example.json";

const ROOT_TITLE: &str = "The root schema";
const ROOT_DESCRIPTION: &str = "The root schema comprises the entire JSON document.";

/// The value held by an event field.
///
/// Object-typed fields own their children exclusively; everything else keeps
/// the raw JSON value as-is, including mixed-type arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Fields(Vec<EventField>),
}

/// One named, typed field of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventField {
    pub name: String,
    pub field_type: FieldType,
    pub value: FieldValue,
}

impl EventField {
    /// Build a field from a raw name/value pair.
    ///
    /// No validation is performed; any JSON value is accepted. Nested objects
    /// recurse into child fields in the iteration order of the source map.
    pub fn new(name: &str, value: &Value) -> EventField {
        let field_type = FieldType::of_value(value);
        let value = match value.as_object() {
            Some(map) if field_type == FieldType::Object => FieldValue::Fields(
                map.iter()
                    .map(|(child_name, child_value)| EventField::new(child_name, child_value))
                    .collect(),
            ),
            _ => FieldValue::Scalar(value.clone()),
        };

        EventField {
            name: name.to_string(),
            field_type,
            value,
        }
    }
}

/// The typed field tree for one ingested payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub fields: Vec<EventField>,
}

impl Event {
    /// Build an event tree from a raw payload.
    ///
    /// The payload must be a JSON object; one [`EventField`] is constructed
    /// per top-level key.
    pub fn from_value(raw: &Value) -> Result<Event> {
        let map = raw
            .as_object()
            .ok_or_else(|| Error::Event(FieldType::of_value(raw).as_str().to_string()))?;

        Ok(Event {
            fields: map
                .iter()
                .map(|(name, value)| EventField::new(name, value))
                .collect(),
        })
    }

    /// Derive a JSON-Schema-shaped mapping from this event.
    ///
    /// The result carries fixed root metadata and one `properties` entry per
    /// field. `required` is always empty: inference never infers
    /// required-ness. Recomputed on every call, never cached.
    pub fn infer_schema(&self) -> Value {
        let mut root = json!({
            "$schema": SCHEMA_URI,
            "$id": ROOT_ID,
            "type": "object",
            "title": ROOT_TITLE,
            "description": ROOT_DESCRIPTION,
            "required": [],
        });
        root["properties"] = Value::Object(properties_of(&self.fields));
        root
    }
}

/// Build the `properties` map for a list of fields.
fn properties_of(fields: &[EventField]) -> Map<String, Value> {
    let mut properties = Map::new();

    for field in fields {
        let entry = match &field.value {
            FieldValue::Fields(children) => json!({
                "$id": field.name,
                "type": FieldType::Object.as_str(),
                "properties": properties_of(children),
            }),
            FieldValue::Scalar(value) => json!({
                "$id": field.name,
                "type": field.field_type.as_str(),
                "title": format!("{} field", field.name),
                "description": format!("{} field of type {}", field.name, field.field_type),
                "examples": [value],
            }),
        };
        properties.insert(field.name.clone(), entry);
    }

    properties
}
