//! CLI command implementations
//!
//! Each command seeds the environment from the dotenv file, resolves the
//! database configuration once, then runs on a fresh tokio runtime.

use std::path::Path;

use tracing::{error, info};

use crate::config::{load_env_file, ConfigError, DatabaseConfig};
use crate::db::{Connector, PgExecutor, QueryExecutor};
use crate::http_server::{AppState, HttpServer, HttpServerConfig};
use crate::observability::{init_tracing, Event};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Bind host fallback variable
pub const HOST: &str = "HOST";
/// Bind port fallback variable
pub const PORT: &str = "PORT";

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            host,
            port,
            env_file,
            log_format,
            cors_origins,
        } => {
            init_tracing(log_format);
            load_env_file(env_file.as_deref())?;
            let http_config = http_config_from_lookup(host, port, &cors_origins, |name| {
                std::env::var(name).ok()
            })?;
            serve(http_config)
        }
        Command::CheckDb {
            env_file,
            log_format,
        } => {
            init_tracing(log_format);
            check_db(env_file.as_deref())
        }
    }
}

/// Start the HTTP API and serve until the listener fails
pub fn serve(http_config: HttpServerConfig) -> CliResult<()> {
    let executor = PgExecutor::new(Connector::new(load_database_config()?));
    let server = HttpServer::with_config(http_config, AppState::new(executor));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Open and close one database connection
pub fn check_db(env_file: Option<&Path>) -> CliResult<()> {
    load_env_file(env_file)?;
    let executor = PgExecutor::new(Connector::new(load_database_config()?));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::check_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(executor.ping())?;
    println!("Connection successful");
    Ok(())
}

fn load_database_config() -> CliResult<DatabaseConfig> {
    match DatabaseConfig::from_env() {
        Ok(config) => {
            info!(
                event = %Event::ConfigLoaded,
                host = %config.host,
                port = config.port,
                database = %config.database,
                resolve_host = config.resolve_host,
                "database configuration loaded"
            );
            Ok(config)
        }
        Err(e) => {
            error!(event = %Event::ConfigFailed, error = %e, "database configuration invalid");
            Err(e.into())
        }
    }
}

/// Bind address from flags, falling back to `HOST` / `PORT`, then defaults
///
/// CORS origins are validated here; one bad origin fails the command.
pub fn http_config_from_lookup<F>(
    host: Option<String>,
    port: Option<u16>,
    cors_origins: &[String],
    lookup: F,
) -> Result<HttpServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = HttpServerConfig::default();

    if let Some(host) = host.or_else(|| lookup(HOST).filter(|v| !v.is_empty())) {
        config.host = host;
    }

    let port = match port {
        Some(port) => Some(port),
        None => lookup(PORT)
            .filter(|v| !v.is_empty())
            .map(|raw| {
                raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidVar {
                    name: PORT,
                    reason: e.to_string(),
                })
            })
            .transpose()?,
    };
    if let Some(port) = port {
        config.port = port;
    }

    config.with_cors_origins(cors_origins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_bind_defaults() {
        let config = http_config_from_lookup(None, None, &[], lookup(&[])).unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_bind_from_environment() {
        let config =
            http_config_from_lookup(None, None, &[], lookup(&[("HOST", "127.0.0.1"), ("PORT", "8000")]))
                .unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_flags_win_over_environment() {
        let config = http_config_from_lookup(
            Some("localhost".to_string()),
            Some(9000),
            &[],
            lookup(&[("HOST", "127.0.0.1"), ("PORT", "8000")]),
        )
        .unwrap();
        assert_eq!(config.socket_addr(), "localhost:9000");
    }

    #[test]
    fn test_invalid_port_variable() {
        let err = http_config_from_lookup(None, None, &[], lookup(&[("PORT", "cinco mil")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "PORT", .. }));
    }

    #[test]
    fn test_invalid_cors_origin_is_config_error() {
        let origins = vec![
            "http://ok.example".to_string(),
            "http://bad\norigin".to_string(),
        ];
        let err = http_config_from_lookup(None, None, &origins, lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrigin { .. }));

        let cli_err = CliError::from(err);
        assert_eq!(cli_err.code_str(), "BT_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_empty_variables_use_defaults() {
        let config =
            http_config_from_lookup(None, None, &[], lookup(&[("HOST", ""), ("PORT", "")])).unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:5000");
    }
}
