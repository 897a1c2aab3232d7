//! CLI argument definitions using clap
//!
//! Commands:
//! - madrasa-schema list
//! - madrasa-schema describe <entity>
//! - madrasa-schema validate <entity> [--input <file>]
//! - madrasa-schema ddl [<entity>]
//! - madrasa-schema export [--out <dir>] [--force]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// madrasa-schema - record schemas of the madrasa administration system
#[derive(Parser, Debug)]
#[command(name = "madrasa-schema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List declared entities
    List,

    /// Print the persisted and insertable shapes of an entity
    Describe {
        /// Entity or table name
        entity: String,
    },

    /// Validate an insert payload read from a file or stdin
    Validate {
        /// Entity or table name
        entity: String,

        /// JSON file holding the payload (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Print CREATE TABLE statements
    Ddl {
        /// Entity or table name (all entities when omitted)
        entity: Option<String>,
    },

    /// Write schema descriptors, DDL and a manifest to a directory
    Export {
        /// Output directory (config `export_dir` when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
