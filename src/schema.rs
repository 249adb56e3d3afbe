//! Schema trees: typed, nested representations of a JSON Schema document.
//!
//! The builders are total functions over raw `serde_json` values: missing
//! keys default to empty strings or lists, and unrecognized `type` strings
//! degrade to [`FieldType::Unknown`] instead of failing. A node's `name` is
//! always the last `/`-separated segment of its `$id`, so
//! `"#/properties/address/properties/street"` yields `"street"`.
//!
//! Equality between trees is structural: only `(name, type)` at leaves and
//! `(name, type, properties)` at object nodes participate. Cosmetic
//! attributes (`$id`, `title`, `description`, `examples`, `required`) are
//! excluded, which is what lets a schema inferred from an event compare
//! equal to a hand-written reference schema for the same shape.

use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::type_map::FieldType;

/// A leaf (non-object) property of a schema.
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub id: String,
    pub name: String,
    pub field_type: FieldType,
    pub title: String,
    pub description: String,
    pub examples: Vec<Value>,
}

/// An object-typed property with nested properties of its own.
#[derive(Debug, Clone)]
pub struct ObjectField {
    pub id: String,
    pub name: String,
    pub field_type: FieldType,
    pub title: String,
    pub description: String,
    pub required: Vec<String>,
    pub properties: Vec<SchemaNode>,
}

/// The root of a schema document.
///
/// Roots never nest inside `properties`, so this is a standalone type rather
/// than a third [`SchemaNode`] variant.
#[derive(Debug, Clone)]
pub struct EventSchema {
    pub schema: String,
    pub id: String,
    pub name: String,
    pub field_type: FieldType,
    pub title: String,
    pub description: String,
    pub required: Vec<String>,
    pub properties: Vec<SchemaNode>,
}

/// One property of an object node: either a leaf or a nested object.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Leaf(SchemaField),
    Object(ObjectField),
}

impl SchemaField {
    /// Build a leaf field from its raw mapping.
    pub fn from_value(raw: &Value) -> SchemaField {
        let id = string_key(raw, "$id");
        SchemaField {
            name: name_from_id(&id),
            id,
            field_type: FieldType::from_schema_type(&string_key(raw, "type")),
            title: string_key(raw, "title"),
            description: string_key(raw, "description"),
            examples: raw
                .get("examples")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// The attributes that participate in structural equality.
    fn equality_key(&self) -> (&str, FieldType) {
        (self.name.as_str(), self.field_type)
    }
}

impl PartialEq for SchemaField {
    fn eq(&self, other: &Self) -> bool {
        self.equality_key() == other.equality_key()
    }
}

impl ObjectField {
    /// Build an object field from its raw mapping.
    ///
    /// A missing `properties` key yields an empty property list, not an
    /// error.
    pub fn from_value(raw: &Value) -> ObjectField {
        let id = string_key(raw, "$id");
        ObjectField {
            name: name_from_id(&id),
            id,
            field_type: FieldType::from_schema_type(&string_key(raw, "type")),
            title: string_key(raw, "title"),
            description: string_key(raw, "description"),
            required: string_list_key(raw, "required"),
            properties: build_properties(raw),
        }
    }

    fn equality_key(&self) -> (&str, FieldType) {
        (self.name.as_str(), self.field_type)
    }
}

impl PartialEq for ObjectField {
    fn eq(&self, other: &Self) -> bool {
        self.equality_key() == other.equality_key() && self.properties == other.properties
    }
}

impl SchemaNode {
    /// Build a node from a raw property mapping, dispatching on its declared
    /// `type`: `"object"` recurses into an [`ObjectField`], everything else
    /// (including unparseable types) becomes a leaf.
    pub fn from_value(raw: &Value) -> SchemaNode {
        match FieldType::from_schema_type(&string_key(raw, "type")) {
            FieldType::Object => SchemaNode::Object(ObjectField::from_value(raw)),
            _ => SchemaNode::Leaf(SchemaField::from_value(raw)),
        }
    }

    /// The node's derived name.
    pub fn name(&self) -> &str {
        match self {
            SchemaNode::Leaf(field) => &field.name,
            SchemaNode::Object(field) => &field.name,
        }
    }

    /// The node's resolved type tag.
    pub fn field_type(&self) -> FieldType {
        match self {
            SchemaNode::Leaf(field) => field.field_type,
            SchemaNode::Object(field) => field.field_type,
        }
    }
}

impl EventSchema {
    /// Build a schema tree from a raw JSON Schema document.
    ///
    /// Total over any JSON value: a non-object input produces a tree with
    /// empty metadata, no properties, and `Unknown` type. Callers that need
    /// to reject such input should check the raw value first, as the
    /// validator's setter does.
    pub fn from_value(raw: &Value) -> EventSchema {
        let id = string_key(raw, "$id");
        EventSchema {
            schema: string_key(raw, "$schema"),
            name: name_from_id(&id),
            id,
            field_type: FieldType::from_schema_type(&string_key(raw, "type")),
            title: string_key(raw, "title"),
            description: string_key(raw, "description"),
            required: string_list_key(raw, "required"),
            properties: build_properties(raw),
        }
    }

    fn equality_key(&self) -> (&str, FieldType) {
        (self.name.as_str(), self.field_type)
    }
}

impl PartialEq for EventSchema {
    fn eq(&self, other: &Self) -> bool {
        self.equality_key() == other.equality_key() && self.properties == other.properties
    }
}

/// Load a JSON document from disk.
///
/// Returns the parsed value or fails with a read/parse error; no retries.
pub fn load_schema(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let value: Value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Build the ordered property list for an object-shaped raw mapping.
///
/// Order follows the iteration order of the source map, which for
/// `serde_json` is sorted by key; both inferred and reference schemas pass
/// through the same canonical order, so positional comparison is stable.
fn build_properties(raw: &Value) -> Vec<SchemaNode> {
    let Some(properties) = raw.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };
    properties.values().map(SchemaNode::from_value).collect()
}

fn string_key(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn string_list_key(raw: &Value, key: &str) -> Vec<String> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Derive a node name from the last path segment of its `$id`.
fn name_from_id(id: &str) -> String {
    id.rsplit('/').next().unwrap_or(id).to_string()
}
