//! End-to-end tests for schema2hive: event validation against the reference
//! example schema, schema inference round trips, and DDL generation through
//! the handler layer.

use std::cell::RefCell;

use serde_json::{Value, json};

use schema2hive::ddl::TableConfig;
use schema2hive::error::Result;
use schema2hive::event::Event;
use schema2hive::handler::{self, EventPublisher, QueryExecutor};
use schema2hive::schema::EventSchema;
use schema2hive::validator::EventValidator;

/// The reference schema: five top-level fields, three nested under `address`.
fn example_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema",
        "$id": "http://example.com/example.json",
        "type": "object",
        "title": "The root schema",
        "description": "The root schema comprises the entire JSON document.",
        "required": ["eid", "documentNumber", "name", "age", "address"],
        "properties": {
            "eid": {
                "$id": "#/properties/eid",
                "type": "string",
                "title": "The eid schema",
                "description": "An explanation about the purpose of this instance.",
                "examples": ["3e628a05-7a4a-4bf3-8770-084c11601a12"]
            },
            "documentNumber": {
                "$id": "#/properties/documentNumber",
                "type": "string",
                "title": "The documentNumber schema",
                "description": "An explanation about the purpose of this instance.",
                "examples": ["42323235600"]
            },
            "name": {
                "$id": "#/properties/name",
                "type": "string",
                "title": "The name schema",
                "description": "An explanation about the purpose of this instance.",
                "examples": ["Joseph"]
            },
            "age": {
                "$id": "#/properties/age",
                "type": "integer",
                "title": "The age schema",
                "description": "An explanation about the purpose of this instance.",
                "examples": [32]
            },
            "address": {
                "$id": "#/properties/address",
                "type": "object",
                "title": "The address schema",
                "description": "An explanation about the purpose of this instance.",
                "required": ["street", "number", "mailAddress"],
                "properties": {
                    "street": {
                        "$id": "#/properties/address/properties/street",
                        "type": "string",
                        "title": "The street schema",
                        "description": "An explanation about the purpose of this instance.",
                        "examples": ["St. Blue"]
                    },
                    "number": {
                        "$id": "#/properties/address/properties/number",
                        "type": "integer",
                        "title": "The number schema",
                        "description": "An explanation about the purpose of this instance.",
                        "examples": [3]
                    },
                    "mailAddress": {
                        "$id": "#/properties/address/properties/mailAddress",
                        "type": "boolean",
                        "title": "The mailAddress schema",
                        "description": "An explanation about the purpose of this instance.",
                        "examples": [true]
                    }
                }
            }
        }
    })
}

fn example_event() -> Value {
    json!({
        "eid": "3e628a05-7a4a-4bf3-8770-084c11601a12",
        "documentNumber": "42323235600",
        "name": "Joseph",
        "age": 32,
        "address": {
            "street": "St. Blue",
            "number": 3,
            "mailAddress": true
        }
    })
}

fn example_validator() -> EventValidator {
    EventValidator::new(EventSchema::from_value(&example_schema()))
}

#[test]
fn example_event_conforms_to_example_schema() {
    let event = Event::from_value(&example_event()).unwrap();
    assert!(example_validator().is_valid(&event));
}

#[test]
fn unexpected_top_level_key_fails_validation() {
    let mut raw = example_event();
    raw["unexpected"] = json!("surprise");

    let event = Event::from_value(&raw).unwrap();
    assert!(!example_validator().is_valid(&event));
}

#[test]
fn removed_field_fails_validation() {
    let mut raw = example_event();
    raw.as_object_mut().unwrap().remove("name");

    let event = Event::from_value(&raw).unwrap();
    assert!(!example_validator().is_valid(&event));
}

#[test]
fn nested_type_change_fails_validation() {
    let mut raw = example_event();
    raw["address"]["number"] = json!("3");

    let event = Event::from_value(&raw).unwrap();
    assert!(!example_validator().is_valid(&event));
}

#[test]
fn inference_round_trip_matches_literal_schema() {
    let event = Event::from_value(&json!({"foo": "bar"})).unwrap();
    let inferred = event.infer_schema();

    let foo = &inferred["properties"]["foo"];
    assert_eq!(foo["$id"], "foo");
    assert_eq!(foo["type"], "string");

    let rebuilt = EventSchema::from_value(&inferred);
    let literal = EventSchema::from_value(&json!({
        "$id": "http://example.com/example.json",
        "type": "object",
        "required": ["foo"],
        "properties": {
            "foo": {
                "$id": "#/properties/foo",
                "type": "string",
                "title": "The foo schema",
                "examples": ["bar"]
            }
        }
    }));

    assert_eq!(rebuilt, literal);
}

#[test]
fn schema_setter_rejects_non_schema_values() {
    let mut validator = example_validator();
    assert!(validator.set_schema(&json!("INVALID_SCHEMA_OBJECT")).is_err());

    // The reference schema is untouched after a rejected assignment.
    let event = Event::from_value(&example_event()).unwrap();
    assert!(validator.is_valid(&event));
}

struct CountingPublisher {
    count: RefCell<usize>,
}

impl EventPublisher for CountingPublisher {
    fn publish(&self, _event: &Value, _queue_name: &str) -> Result<()> {
        *self.count.borrow_mut() += 1;
        Ok(())
    }
}

#[test]
fn process_event_publishes_only_valid_events() {
    let validator = example_validator();
    let publisher = CountingPublisher {
        count: RefCell::new(0),
    };

    let valid = handler::process_event(
        &validator,
        &example_event(),
        &publisher,
        handler::VALID_EVENTS_QUEUE,
    )
    .unwrap();
    assert!(valid);

    let mut tampered = example_event();
    tampered["age"] = json!("thirty-two");
    let valid = handler::process_event(
        &validator,
        &tampered,
        &publisher,
        handler::VALID_EVENTS_QUEUE,
    )
    .unwrap();
    assert!(!valid);

    assert_eq!(*publisher.count.borrow(), 1);
}

struct CapturingExecutor {
    query: RefCell<Option<String>>,
}

impl QueryExecutor for CapturingExecutor {
    fn start_query(&self, query: &str, _output_location: &str) -> Result<u16> {
        *self.query.borrow_mut() = Some(query.to_string());
        Ok(200)
    }
}

#[test]
fn create_table_from_example_schema() {
    let config = TableConfig::from_value(&json!({
        "location": "s3://my-bucket/my-table/",
        "create_disposition": "if_not_exists",
        "table_reference": {"database": "itidigital", "table_name": "foo"},
        "is_external": true,
        "partition_by": ["eid"],
        "clustered_by": ["documentNumber"],
        "num_buckets": 5,
        "row_format": {
            "name": "org.apache.hadoop.hive.serde2.lazy.LazySimpleSerDe",
            "properties": {
                "serialization.format": ",",
                "field.delim": ",",
                "collection.delim": "|",
                "mapkey.delim": ":",
                "escape.delim": "\\"
            }
        },
        "stored_as": "parquet",
        "table_properties": {"foo": "bar", "prop_name": "prop_value"}
    }))
    .unwrap();

    let executor = CapturingExecutor {
        query: RefCell::new(None),
    };
    let status = handler::create_table(
        &example_schema(),
        config,
        &executor,
        "s3://iti-query-results/",
    )
    .unwrap();
    assert_eq!(status, 200);

    let query = executor.query.borrow().clone().unwrap();
    assert!(query.starts_with("CREATE EXTERNAL TABLE IF NOT EXISTS itidigital.foo ("));
    assert!(query.contains("eid string"));
    assert!(query.contains("documentNumber string"));
    assert!(query.contains("name string"));
    assert!(query.contains("age integer"));
    assert!(query.contains("address struct<mailAddress:boolean,number:integer,street:string>"));
    assert!(query.contains("PARTITIONED BY (eid)"));
    assert!(query.contains("CLUSTERED BY (documentNumber) INTO 5 BUCKETS"));
    assert!(query.contains("STORED AS parquet"));
    assert!(query.contains("LOCATION 's3://my-bucket/my-table/'"));
}

#[test]
fn create_table_rejects_field_override() {
    let config = TableConfig::from_value(&json!({
        "location": "s3://my-bucket/my-table/",
        "table_reference": {"table_name": "foo"},
        "fields": {"foo": {"type": "string"}}
    }))
    .unwrap();

    let executor = CapturingExecutor {
        query: RefCell::new(None),
    };
    let result = handler::create_table(
        &example_schema(),
        config,
        &executor,
        "s3://iti-query-results/",
    );

    assert!(result.is_err());
    assert!(executor.query.borrow().is_none());
}
