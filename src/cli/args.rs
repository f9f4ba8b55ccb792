//! CLI argument definitions using clap
//!
//! Commands:
//! - banco-tierras serve [--host H] [--port P] [--env-file F] [--log-format F]
//! - banco-tierras check-db [--env-file F]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::LogFormat;

/// Banco de Tierras - read-only JSON API over the land bank database
#[derive(Parser, Debug)]
#[command(name = "banco-tierras")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Address to bind (falls back to HOST, then 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (falls back to PORT, then 5000)
        #[arg(long)]
        port: Option<u16>,

        /// Dotenv file to load before reading the environment
        #[arg(long)]
        env_file: Option<PathBuf>,

        /// Log line format
        #[arg(long, value_enum, default_value_t = LogFormat::Text)]
        log_format: LogFormat,

        /// Restrict CORS to this origin (repeatable)
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },

    /// Open and close one database connection, then exit
    CheckDb {
        /// Dotenv file to load before reading the environment
        #[arg(long)]
        env_file: Option<PathBuf>,

        /// Log line format
        #[arg(long, value_enum, default_value_t = LogFormat::Text)]
        log_format: LogFormat,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
