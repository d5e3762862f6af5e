//! CLI argument definitions using clap
//!
//! Commands:
//! - docschema validate --schema <name> [--config <path>]
//! - docschema schemas

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docschema - validate documents against record schemas before storage
#[derive(Parser, Debug)]
#[command(name = "docschema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate JSON documents read from stdin, one per line
    Validate {
        /// Schema type or collection name (user, product, blogpost)
        #[arg(long, short)]
        schema: String,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the schema catalog as JSON
    Schemas,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
