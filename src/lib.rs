//! Infer, validate, and translate JSON Schemas for event payloads.
//!
//! `schema2hive` turns one sample event into a typed field tree, derives a
//! draft-07-shaped JSON Schema from it, and validates events against a
//! reference schema by structural comparison (cosmetic attributes like
//! `title`, `description`, `examples`, and `$id` spelling are ignored). The
//! same schema trees can be projected into Hive vocabulary and rendered as
//! Hive/Athena `CREATE TABLE` DDL statements.
//!
//! # Features
//!
//! - Recursive schema inference from arbitrarily nested event payloads
//! - Structural schema comparison over `(name, type, properties)` only
//! - Lenient schema tree building: unrecognized types degrade to `unknown`
//! - Hive type projection and full `CREATE TABLE` DDL rendering
//! - Deterministic output: properties iterate in sorted key order
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use schema2hive::event::Event;
//! use schema2hive::schema::EventSchema;
//! use schema2hive::validator::EventValidator;
//!
//! let reference = EventSchema::from_value(&json!({
//!     "$id": "http://example.com/example.json",
//!     "type": "object",
//!     "properties": {
//!         "foo": {"$id": "#/properties/foo", "type": "string"}
//!     }
//! }));
//! let validator = EventValidator::new(reference);
//!
//! let event = Event::from_value(&json!({"foo": "bar"}))?;
//! assert!(validator.is_valid(&event));
//! # Ok::<(), schema2hive::error::Error>(())
//! ```

pub mod ddl;
pub mod error;
pub mod event;
pub mod handler;
pub mod schema;
pub mod type_map;
pub mod validator;
