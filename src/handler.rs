//! Boundary orchestration: validate-and-publish and create-table flows.
//!
//! The collaborators that touch the outside world (queue publishing, query
//! execution) are trait objects passed in by the caller. The handlers here
//! wire the core engine to them one event or one schema at a time; delivery
//! semantics and retries belong to the collaborator, not to this crate.

use serde_json::Value;

use crate::ddl::{HiveTable, TableConfig};
use crate::error::Result;
use crate::event::Event;
use crate::schema::EventSchema;
use crate::validator::EventValidator;

/// Default queue name for validated events.
pub const VALID_EVENTS_QUEUE: &str = "valid-events-queue";

/// Accepts raw events that passed validation.
pub trait EventPublisher {
    fn publish(&self, event: &Value, queue_name: &str) -> Result<()>;
}

/// Executes a DDL statement and reports the response status code.
pub trait QueryExecutor {
    fn start_query(&self, query: &str, output_location: &str) -> Result<u16>;
}

/// Validate one raw event and publish it when it conforms.
///
/// Returns whether the event was valid. Invalid events are not published;
/// what to do with them (skip, alert, abort a batch) is the caller's call.
pub fn process_event(
    validator: &EventValidator,
    raw_event: &Value,
    publisher: &dyn EventPublisher,
    queue_name: &str,
) -> Result<bool> {
    let event = Event::from_value(raw_event)?;

    if !validator.is_valid(&event) {
        return Ok(false);
    }

    publisher.publish(raw_event, queue_name)?;
    Ok(true)
}

/// Create a Hive table from a raw JSON Schema document.
///
/// Builds the schema tree, projects it into Hive fields, renders the DDL,
/// and submits it to the executor. Returns the executor's status code; the
/// response is not interpreted further.
pub fn create_table(
    raw_schema: &Value,
    config: TableConfig,
    executor: &dyn QueryExecutor,
    output_location: &str,
) -> Result<u16> {
    let schema = EventSchema::from_value(raw_schema);
    let table = HiveTable::from_schema(schema, config)?;
    let query = table.ddl_statement()?;

    executor.start_query(&query, output_location)
}
