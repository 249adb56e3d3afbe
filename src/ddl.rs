//! Hive table modeling and `CREATE TABLE` DDL rendering.
//!
//! [`project_fields`] rewrites a schema tree's types from JSON Schema
//! vocabulary into Hive vocabulary and flattens it into the field mapping a
//! table is rendered from. The projector consumes the tree: a projected
//! schema cannot be projected again or reused for validation, so the
//! relabeling runs exactly once per tree by construction.
//!
//! [`HiveTable`] carries that field mapping plus the table metadata
//! (disposition, reference, storage format, partitioning/clustering, row
//! format, free-form properties) and renders the full DDL statement.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::schema::{EventSchema, SchemaNode};
use crate::type_map::HiveType;

/// Whether table creation tolerates an existing table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateDisposition {
    #[default]
    IfNotExists,
    Overwrite,
}

impl CreateDisposition {
    fn as_sql(self) -> &'static str {
        match self {
            CreateDisposition::IfNotExists => "IF NOT EXISTS",
            CreateDisposition::Overwrite => "",
        }
    }
}

/// Storage format for the `STORED AS` clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Sequencefile,
    #[default]
    Textfile,
    Rcfile,
    Orc,
    Parquet,
    Avro,
    Ion,
    Inputformat,
    Outputformat,
}

impl FileFormat {
    fn as_sql(self) -> &'static str {
        match self {
            FileFormat::Sequencefile => "sequencefile",
            FileFormat::Textfile => "textfile",
            FileFormat::Rcfile => "rcfile",
            FileFormat::Orc => "orc",
            FileFormat::Parquet => "parquet",
            FileFormat::Avro => "avro",
            FileFormat::Ion => "ion",
            FileFormat::Inputformat => "inputformat",
            FileFormat::Outputformat => "outputformat",
        }
    }
}

/// Delimiter clause kinds for `ROW FORMAT DELIMITED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    DelimitedFieldsTerminatedBy,
    DelimitedCollectionItemsTerminatedBy,
    MapKeysTerminatedBy,
    LinesTerminatedBy,
    NullDefinedAs,
}

impl Delimiter {
    fn as_sql(self) -> &'static str {
        match self {
            Delimiter::DelimitedFieldsTerminatedBy => "DELIMITED FIELDS TERMINATED BY",
            Delimiter::DelimitedCollectionItemsTerminatedBy => {
                "DELIMITED COLLECTION ITEMS TERMINATED BY"
            }
            Delimiter::MapKeysTerminatedBy => "MAP KEYS TERMINATED BY",
            Delimiter::LinesTerminatedBy => "LINES TERMINATED BY",
            Delimiter::NullDefinedAs => "NULL DEFINED AS",
        }
    }
}

/// The two recognized `ROW FORMAT` variants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RowFormat {
    /// `SERDE <name> WITH SERDEPROPERTIES (...)`.
    Serde {
        name: String,
        #[serde(default)]
        properties: BTreeMap<String, String>,
    },

    /// `<DELIMITER CLAUSE> <char>`.
    Delimited {
        delimiter: Delimiter,
        #[serde(rename = "char")]
        character: String,
    },
}

impl RowFormat {
    fn as_sql(&self) -> String {
        match self {
            RowFormat::Serde { name, properties } => {
                let serde_properties = properties
                    .iter()
                    .map(|(key, value)| format!("\"{key}\" = \"{value}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("SERDE {name} WITH SERDEPROPERTIES ({serde_properties})")
            }
            RowFormat::Delimited {
                delimiter,
                character,
            } => format!("{} {}", delimiter.as_sql(), character),
        }
    }
}

/// A table name, optionally qualified by a database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableReference {
    pub table_name: String,
    #[serde(default)]
    pub database: Option<String>,
}

/// One entry in the flattened Hive field mapping.
///
/// This is the shape the DDL renderer consumes; leaves carry a type and
/// description, structs additionally carry their nested fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HiveField {
    // Struct must be tried first: an untagged regular field would otherwise
    // match a struct-shaped map and drop its nested fields.
    Struct {
        #[serde(rename = "type")]
        field_type: HiveType,
        #[serde(default)]
        description: String,
        fields: BTreeMap<String, HiveField>,
    },
    Regular {
        #[serde(rename = "type")]
        field_type: HiveType,
        #[serde(default)]
        description: String,
    },
}

/// Everything needed to render a table besides its fields.
///
/// Deserializable from a JSON document so the CLI can take a table config
/// file. A config may carry an explicit `fields` mapping only when the table
/// is built directly from it; schema-derived tables reject it.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub location: String,
    pub table_reference: TableReference,
    #[serde(default)]
    pub create_disposition: CreateDisposition,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub partition_by: Vec<String>,
    #[serde(default)]
    pub clustered_by: Vec<String>,
    #[serde(default)]
    pub num_buckets: Option<u32>,
    #[serde(default)]
    pub row_format: Option<RowFormat>,
    #[serde(default)]
    pub stored_as: FileFormat,
    #[serde(default)]
    pub table_properties: BTreeMap<String, String>,
    #[serde(default)]
    pub fields: Option<BTreeMap<String, HiveField>>,
}

impl TableConfig {
    /// Parse a table config from a raw JSON document.
    ///
    /// A `row_format` that matches neither recognized variant is reported as
    /// [`Error::InvalidRowFormat`] instead of a generic parse error.
    pub fn from_value(raw: &Value) -> Result<TableConfig> {
        if let Some(row_format) = raw.get("row_format") {
            if !row_format.is_null() && RowFormat::deserialize(row_format).is_err() {
                return Err(Error::InvalidRowFormat(row_format.to_string()));
            }
        }
        Ok(serde_json::from_value(raw.clone())?)
    }
}

/// Project a schema tree into the flattened Hive field mapping.
///
/// Leaf types are relabeled through [`HiveType::from_field_type`]; object
/// fields become `struct` entries with their properties recursed. Field
/// order follows the tree's property order (sorted by name).
pub fn project_fields(schema: EventSchema) -> BTreeMap<String, HiveField> {
    nodes_to_fields(schema.properties)
}

fn nodes_to_fields(nodes: Vec<SchemaNode>) -> BTreeMap<String, HiveField> {
    nodes
        .into_iter()
        .map(|node| match node {
            SchemaNode::Leaf(field) => (
                field.name,
                HiveField::Regular {
                    field_type: HiveType::from_field_type(field.field_type),
                    description: field.description,
                },
            ),
            SchemaNode::Object(field) => (
                field.name,
                HiveField::Struct {
                    field_type: HiveType::from_field_type(field.field_type),
                    description: field.description,
                    fields: nodes_to_fields(field.properties),
                },
            ),
        })
        .collect()
}

/// A Hive table ready to be rendered as a `CREATE TABLE` statement.
#[derive(Debug, Clone)]
pub struct HiveTable {
    config: TableConfig,
    fields: BTreeMap<String, HiveField>,
}

impl HiveTable {
    /// Build a table from an explicit field mapping.
    pub fn new(mut config: TableConfig, fields: BTreeMap<String, HiveField>) -> HiveTable {
        config.fields = None;
        HiveTable { config, fields }
    }

    /// Build a table whose fields are projected from a schema tree.
    ///
    /// The config must not carry its own `fields`: schema-derived tables take
    /// their fields exclusively from the projection.
    pub fn from_schema(schema: EventSchema, config: TableConfig) -> Result<HiveTable> {
        if config.fields.is_some() {
            return Err(Error::FieldsOverride);
        }
        let fields = project_fields(schema);
        Ok(HiveTable::new(config, fields))
    }

    /// Render the full `CREATE TABLE` DDL statement.
    pub fn ddl_statement(&self) -> Result<String> {
        let location = self.location()?;
        let mut out = String::new();

        let mut head = format!("CREATE {}", self.table_type());
        let disposition = self.config.create_disposition.as_sql();
        if !disposition.is_empty() {
            head.push(' ');
            head.push_str(disposition);
        }
        writeln!(out, "{head} {} (", self.qualified_name()).unwrap();
        writeln!(out, "\t{}", self.rendered_fields()).unwrap();
        writeln!(out, ")").unwrap();

        if let Some(comment) = &self.config.comment {
            writeln!(out, "COMMENT '{comment}'").unwrap();
        }
        if !self.config.partition_by.is_empty() {
            writeln!(
                out,
                "PARTITIONED BY ({})",
                self.config.partition_by.join(",")
            )
            .unwrap();
        }
        if !self.config.clustered_by.is_empty() {
            write!(out, "CLUSTERED BY ({})", self.config.clustered_by.join(",")).unwrap();
            if let Some(buckets) = self.config.num_buckets {
                write!(out, " INTO {buckets} BUCKETS").unwrap();
            }
            writeln!(out).unwrap();
        }
        if let Some(row_format) = &self.config.row_format {
            writeln!(out, "ROW FORMAT {}", row_format.as_sql()).unwrap();
        }
        writeln!(out, "STORED AS {}", self.config.stored_as.as_sql()).unwrap();
        writeln!(out, "LOCATION '{location}'").unwrap();
        if !self.config.table_properties.is_empty() {
            let properties = self
                .config
                .table_properties
                .iter()
                .map(|(name, value)| format!("{name} = {value}"))
                .collect::<Vec<_>>()
                .join(",\n\t");
            writeln!(out, "TBLPROPERTIES ({properties})").unwrap();
        }

        Ok(out)
    }

    fn table_type(&self) -> &'static str {
        if self.config.is_external {
            "EXTERNAL TABLE"
        } else {
            "TABLE"
        }
    }

    /// The database-qualified table name under the quoting rule: a name with
    /// a leading `_` is back-tick-quoted, a name containing any digit is
    /// double-quote-quoted, anything else is bare.
    fn qualified_name(&self) -> String {
        let table = &self.config.table_reference.table_name;
        let base = match &self.config.table_reference.database {
            Some(database) => format!("{database}.{table}"),
            None => table.clone(),
        };

        if table.starts_with('_') {
            format!("`{base}`")
        } else if table.chars().any(|c| c.is_ascii_digit()) {
            format!("\"{base}\"")
        } else {
            base
        }
    }

    fn rendered_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(name, field)| render_field(name, field))
            .collect::<Vec<_>>()
            .join(",\n\t")
    }

    fn location(&self) -> Result<&str> {
        let location = self.config.location.as_str();
        if !location.starts_with("s3://") {
            return Err(Error::InvalidS3Location(format!(
                "{location} must start with `s3://`"
            )));
        }
        if !location.ends_with('/') {
            return Err(Error::InvalidS3Location(format!(
                "{location} must end with `/`"
            )));
        }
        Ok(location)
    }
}

fn render_field(name: &str, field: &HiveField) -> String {
    match field {
        HiveField::Regular { field_type, .. } => format!("{name} {field_type}"),
        HiveField::Struct {
            field_type, fields, ..
        } => format!("{name} {field_type}<{}>", render_nested_fields(fields)),
    }
}

fn render_nested_fields(fields: &BTreeMap<String, HiveField>) -> String {
    fields
        .iter()
        .map(|(name, field)| match field {
            HiveField::Regular { field_type, .. } => format!("{name}:{field_type}"),
            HiveField::Struct {
                field_type, fields, ..
            } => format!("{name}:{field_type}<{}>", render_nested_fields(fields)),
        })
        .collect::<Vec<_>>()
        .join(",")
}
