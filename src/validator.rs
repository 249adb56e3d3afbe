//! Event validation against a reference schema.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::event::Event;
use crate::schema::EventSchema;
use crate::type_map::FieldType;

/// Validates events against a reference schema tree.
///
/// Validation infers a schema from the event, rebuilds a schema tree from
/// the inferred mapping, and compares it structurally to the reference.
/// A field added to the event, removed from it, or changed in type all make
/// the trees unequal, so validation fails.
#[derive(Debug, Clone)]
pub struct EventValidator {
    schema: EventSchema,
}

impl EventValidator {
    pub fn new(schema: EventSchema) -> EventValidator {
        EventValidator { schema }
    }

    /// The current reference schema.
    pub fn schema(&self) -> &EventSchema {
        &self.schema
    }

    /// Replace the reference schema from a raw JSON Schema document.
    ///
    /// This is the one validated mutation path in the engine: a value that
    /// is not a JSON object cannot be a schema and is rejected with
    /// [`Error::InvalidSchemaType`].
    pub fn set_schema(&mut self, raw: &Value) -> Result<()> {
        if !raw.is_object() {
            return Err(Error::InvalidSchemaType(
                FieldType::of_value(raw).as_str().to_string(),
            ));
        }
        self.schema = EventSchema::from_value(raw);
        Ok(())
    }

    /// Check whether an event conforms to the reference schema.
    pub fn is_valid(&self, event: &Event) -> bool {
        EventSchema::from_value(&event.infer_schema()) == self.schema
    }
}
