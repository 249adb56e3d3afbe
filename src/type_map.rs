//! Canonical field type tags and the mapping tables that populate them.
//!
//! # Type Mapping Tables
//!
//! | JSON value | FieldType | JSON Schema string | FieldType |
//! |------------|-----------|--------------------|-----------|
//! | string | `String` | `"string"` | `String` |
//! | number | `Integer` | `"integer"` | `Integer` |
//! | object | `Object` | `"object"` | `Object` |
//! | array | `Array` | `"array"` | `Array` |
//! | bool | `Boolean` | `"boolean"` | `Boolean` |
//! | null | `Null` | `"null"` | `Null` |
//! | | | anything else | `Unknown` |
//!
//! Lookups never fail: a type string with no entry resolves to `Unknown`.
//! Schema type strings are matched case-insensitively.
//!
//! The Hive table ([`HiveType`]) is a pure relabeling of the same tags into
//! DDL vocabulary; the only name that changes is `object` → `struct`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical tag for a field's type, shared by event trees and schema trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Object,
    Array,
    Boolean,
    Null,
    Unknown,
}

impl FieldType {
    /// Resolve the tag for a raw JSON value.
    ///
    /// Every `serde_json::Value` variant has an entry, so this lookup cannot
    /// miss; `Unknown` only arises from the string table below. Numbers map
    /// to `Integer` whether or not they carry a fractional part, matching the
    /// reference schema vocabulary, which has no separate float type.
    pub fn of_value(value: &serde_json::Value) -> FieldType {
        match value {
            serde_json::Value::String(_) => FieldType::String,
            serde_json::Value::Number(_) => FieldType::Integer,
            serde_json::Value::Object(_) => FieldType::Object,
            serde_json::Value::Array(_) => FieldType::Array,
            serde_json::Value::Bool(_) => FieldType::Boolean,
            serde_json::Value::Null => FieldType::Null,
        }
    }

    /// Resolve the tag for a JSON Schema `type` string, case-insensitively.
    ///
    /// Unrecognized or empty strings resolve to `Unknown`, never an error.
    pub fn from_schema_type(type_name: &str) -> FieldType {
        match type_name.to_ascii_lowercase().as_str() {
            "string" => FieldType::String,
            "integer" => FieldType::Integer,
            "object" => FieldType::Object,
            "array" => FieldType::Array,
            "boolean" => FieldType::Boolean,
            "null" => FieldType::Null,
            _ => FieldType::Unknown,
        }
    }

    /// The JSON Schema spelling of this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Boolean => "boolean",
            FieldType::Null => "null",
            FieldType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field type in Hive DDL vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiveType {
    String,
    Integer,
    Struct,
    Array,
    Boolean,
    Null,
    Unknown,
}

impl HiveType {
    /// Relabel a canonical tag into Hive vocabulary.
    pub fn from_field_type(field_type: FieldType) -> HiveType {
        match field_type {
            FieldType::String => HiveType::String,
            FieldType::Integer => HiveType::Integer,
            FieldType::Object => HiveType::Struct,
            FieldType::Array => HiveType::Array,
            FieldType::Boolean => HiveType::Boolean,
            FieldType::Null => HiveType::Null,
            FieldType::Unknown => HiveType::Unknown,
        }
    }

    /// The DDL spelling of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            HiveType::String => "string",
            HiveType::Integer => "integer",
            HiveType::Struct => "struct",
            HiveType::Array => "array",
            HiveType::Boolean => "boolean",
            HiveType::Null => "null",
            HiveType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
