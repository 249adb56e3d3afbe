//! Error types for the schema2hive crate.

use std::path::PathBuf;

/// Errors that can occur during event validation or DDL generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read a file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parse error with context.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An event payload that is not a JSON object.
    #[error("event payload should be a JSON object, but got {0}")]
    Event(String),

    /// The validator's schema setter was given a value that cannot be a schema.
    #[error("schema should be a JSON object, but got {0}")]
    InvalidSchemaType(String),

    /// A table config supplied its own `fields` to a schema-derived table.
    #[error(
        "fields should not be specified in the table config; they are projected from the schema"
    )]
    FieldsOverride,

    /// A row format that is neither a SERDE nor a delimiter clause.
    #[error("invalid row format: {0}")]
    InvalidRowFormat(String),

    /// A storage location violating the `s3://` prefix / trailing-slash rule.
    #[error("invalid S3 location: {0}")]
    InvalidS3Location(String),

    /// Failure reported by the queue publisher collaborator.
    #[error("failed to publish event: {0}")]
    Publish(String),

    /// Failure reported by the query execution collaborator.
    #[error("query execution failed: {0}")]
    Query(String),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
