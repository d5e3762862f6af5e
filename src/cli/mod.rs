//! CLI module
//!
//! Provides command-line interface for:
//! - validate: Validate a stream of JSON documents against one schema
//! - schemas: Print the schema catalog

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{run, run_command, schemas, validate, ValidationTally};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_lines, write_json, InputLine};
