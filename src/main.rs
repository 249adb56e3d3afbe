use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde_json::Value;

use schema2hive::ddl::{HiveTable, TableConfig};
use schema2hive::error::Result;
use schema2hive::handler::{self, EventPublisher};
use schema2hive::schema::{EventSchema, load_schema};
use schema2hive::validator::EventValidator;

/// Validate events against a JSON Schema and generate Hive/Athena DDL.
///
/// Validation infers a schema from the event payload and compares it
/// structurally against the reference schema. DDL generation projects the
/// reference schema into Hive types and renders a CREATE TABLE statement.
#[derive(Parser)]
#[command(name = "schema2hive", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an event file against a reference JSON Schema.
    Validate {
        /// Path to the reference JSON Schema file.
        #[arg(long)]
        schema: PathBuf,

        /// Path to the event payload file (a JSON object).
        #[arg(long)]
        event: PathBuf,

        /// Queue name announced for valid events.
        #[arg(
            long,
            default_value = handler::VALID_EVENTS_QUEUE,
            env = "SCHEMA2HIVE_QUEUE"
        )]
        queue: String,

        /// Suppress non-error output.
        #[arg(long, short)]
        quiet: bool,
    },

    /// Render a CREATE TABLE DDL statement from a JSON Schema.
    GenerateDdl {
        /// Path to the JSON Schema file.
        #[arg(long)]
        schema: PathBuf,

        /// Path to the table config file (location, table_reference, ...).
        #[arg(long)]
        table_config: PathBuf,

        /// Suppress non-error output.
        #[arg(long, short)]
        quiet: bool,
    },
}

/// Publisher that announces deliveries on stderr.
///
/// Stands in for a real queue client; delivery is the queue collaborator's
/// concern, not this tool's.
struct AnnouncingPublisher {
    quiet: bool,
}

impl EventPublisher for AnnouncingPublisher {
    fn publish(&self, event: &Value, queue_name: &str) -> Result<()> {
        if !self.quiet {
            eprintln!("Publishing event to queue '{queue_name}': {event}");
        }
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");

            // Print cause chain.
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = std::error::Error::source(cause);
            }

            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Validate {
            schema,
            event,
            queue,
            quiet,
        } => {
            let raw_schema = load_schema(&schema)?;
            let validator = EventValidator::new(EventSchema::from_value(&raw_schema));

            // Event files are plain JSON documents; reuse the schema loader.
            let raw_event = load_schema(&event)?;

            let publisher = AnnouncingPublisher { quiet };
            let valid = handler::process_event(&validator, &raw_event, &publisher, &queue)?;

            if valid {
                if !quiet {
                    eprintln!("event conforms to the reference schema");
                }
                Ok(0)
            } else {
                eprintln!("event does not conform to the reference schema");
                Ok(1)
            }
        }

        Commands::GenerateDdl {
            schema,
            table_config,
            quiet,
        } => {
            let raw_schema = load_schema(&schema)?;
            let raw_config = load_schema(&table_config)?;
            let config = TableConfig::from_value(&raw_config)?;

            let event_schema = EventSchema::from_value(&raw_schema);
            if !quiet {
                eprintln!(
                    "Loaded schema '{}' with {} top-level properties",
                    event_schema.name,
                    event_schema.properties.len()
                );
            }

            let table = HiveTable::from_schema(event_schema, config)?;
            print!("{}", table.ddl_statement()?);
            Ok(0)
        }
    }
}
