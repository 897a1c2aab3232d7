//! CLI module for madrasa-schema
//!
//! Provides command-line access to the schema registry:
//! - list: Declared entities
//! - describe: Shapes and constraints of one entity
//! - validate: Check an insert payload
//! - ddl: CREATE TABLE statements
//! - export: Descriptor files, DDL and manifest on disk

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{ddl, describe, export, list, run, run_command, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
