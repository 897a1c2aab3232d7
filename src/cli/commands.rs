//! CLI command implementations
//!
//! Commands read only static declarations; `export` is the only one that
//! writes to disk. Responses go to stdout as JSON (DDL as plain SQL), logs go
//! to stderr.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::config::RegistryConfig;
use crate::registry::{RegistryError, SchemaRegistry};
use crate::schema::{create_table_sql, create_tables_sql, SchemaDescriptor, SchemaExporter};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_payload, write_rejection, write_response, write_text};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "MADRASA_SCHEMA_LOG";

/// Main entry point: parse args, load config, dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let config = match &cli.config {
        Some(path) => RegistryConfig::load(path)?,
        None => RegistryConfig::default(),
    };

    init_tracing(&config, cli.verbose, cli.quiet)?;

    run_command(cli.command, &config)
}

fn init_tracing(config: &RegistryConfig, verbose: bool, quiet: bool) -> CliResult<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::config_error(format!("Failed to initialize logging: {}", e)))
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: &RegistryConfig) -> CliResult<()> {
    let registry = SchemaRegistry::from_config(config);

    match cmd {
        Command::List => list(&registry),
        Command::Describe { entity } => describe(&registry, &entity),
        Command::Validate { entity, input } => validate(&registry, &entity, input.as_deref()),
        Command::Ddl { entity } => ddl(&registry, entity.as_deref()),
        Command::Export { out, force } => {
            let out = out.unwrap_or_else(|| config.export_dir.clone());
            export(&registry, out, force)
        }
    }
}

/// List declared entities
pub fn list(registry: &SchemaRegistry) -> CliResult<()> {
    let entities: Vec<_> = registry
        .entities()
        .map(|schema| {
            json!({
                "entity": schema.entity,
                "table": schema.table,
                "fields": schema.fields.len(),
            })
        })
        .collect();

    write_response(entities)
}

/// Print the shapes and constraints of one entity
pub fn describe(registry: &SchemaRegistry, entity: &str) -> CliResult<()> {
    let schema = registry.lookup(entity)?;
    write_response(SchemaDescriptor::new(schema))
}

/// Validate an insert payload
///
/// A rejected payload is reported on stdout as an error response before the
/// command fails.
pub fn validate(registry: &SchemaRegistry, entity: &str, input: Option<&Path>) -> CliResult<()> {
    let payload = read_payload(input)?;

    match registry.validate(entity, &payload) {
        Ok(normalized) => write_response(normalized),
        Err(RegistryError::Validation(err)) => {
            write_rejection(err.code(), err.entity(), err.issues())?;
            Err(CliError::validation_failed(err.to_string()))
        }
        Err(other) => Err(other.into()),
    }
}

/// Print DDL for one entity or for all of them
pub fn ddl(registry: &SchemaRegistry, entity: Option<&str>) -> CliResult<()> {
    let sql = match entity {
        Some(name) => create_table_sql(registry.lookup(name)?),
        None => create_tables_sql(registry.entities()),
    };
    write_text(&sql)
}

/// Write the export bundle to `out`
pub fn export(registry: &SchemaRegistry, out: PathBuf, force: bool) -> CliResult<()> {
    let schemas: Vec<_> = registry.entities().collect();
    let manifest = SchemaExporter::new(out).force(force).export(&schemas)?;
    write_response(manifest)
}
