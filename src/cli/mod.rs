//! CLI module for Banco de Tierras
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API
//! - check-db: Verify database connectivity and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_db, http_config_from_lookup, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
