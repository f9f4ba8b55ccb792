//! # Database Configuration
//!
//! Connection settings resolved once from the process environment into an
//! immutable [`DatabaseConfig`]. The lookup function is injectable so tests
//! never touch the real environment.
//!
//! # Variables
//!
//! - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_NAME`, `DB_PASSWORD` (required)
//! - `DB_RESOLVE_HOST` (optional, default `false`)
//! - `DB_SSLMODE` (optional, default `require`)

mod errors;

use std::fmt;
use std::path::Path;

pub use errors::{ConfigError, ConfigResult};

pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_USER: &str = "DB_USER";
pub const DB_NAME: &str = "DB_NAME";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_RESOLVE_HOST: &str = "DB_RESOLVE_HOST";
pub const DB_SSLMODE: &str = "DB_SSLMODE";

/// TLS negotiation, spelled as libpq's `sslmode`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SslMode {
    Disable,
    Prefer,
    #[default]
    Require,
    VerifyCa,
    VerifyFull,
}

impl SslMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "disable" => Some(SslMode::Disable),
            "prefer" => Some(SslMode::Prefer),
            "require" => Some(SslMode::Require),
            "verify-ca" => Some(SslMode::VerifyCa),
            "verify-full" => Some(SslMode::VerifyFull),
            _ => None,
        }
    }
}

/// Immutable PostgreSQL connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub database: String,
    pub password: String,
    /// Resolve `host` to an address before connecting
    pub resolve_host: bool,
    pub ssl_mode: SslMode,
}

impl DatabaseConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Variables are checked in a fixed order so the first missing one is
    /// always the one reported.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = required(&lookup, DB_HOST)?;
        let port_raw = required(&lookup, DB_PORT)?;
        let user = required(&lookup, DB_USER)?;
        let database = required(&lookup, DB_NAME)?;
        let password = required(&lookup, DB_PASSWORD)?;

        let port = port_raw
            .trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidVar {
                name: DB_PORT,
                reason: format!("'{}' is not a valid port ({})", port_raw, e),
            })?;

        let resolve_host = match lookup(DB_RESOLVE_HOST) {
            Some(raw) if !raw.trim().is_empty() => {
                parse_flag(&raw).ok_or_else(|| ConfigError::InvalidVar {
                    name: DB_RESOLVE_HOST,
                    reason: format!("'{}' is not a boolean", raw),
                })?
            }
            _ => false,
        };

        let ssl_mode = match lookup(DB_SSLMODE) {
            Some(raw) if !raw.trim().is_empty() => {
                SslMode::parse(&raw).ok_or_else(|| ConfigError::InvalidVar {
                    name: DB_SSLMODE,
                    reason: format!("'{}' is not an sslmode", raw),
                })?
            }
            _ => SslMode::Require,
        };

        Ok(Self {
            host,
            port,
            user,
            database,
            password,
            resolve_host,
            ssl_mode,
        })
    }
}

// Never print the password.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .field("password", &"<redacted>")
            .field("resolve_host", &self.resolve_host)
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

fn required<F>(lookup: &F, name: &'static str) -> ConfigResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Parse a boolean flag the way query parameters and env vars spell them
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Seed the environment from a dotenv file
///
/// Variables already present in the environment win. A missing default
/// `.env` is not an error; a missing explicit path is.
pub fn load_env_file(path: Option<&Path>) -> ConfigResult<()> {
    match path {
        Some(path) => dotenvy::from_path(path)
            .map(|_| ())
            .map_err(|e| ConfigError::EnvFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        None => match dotenvy::dotenv() {
            Ok(_) => Ok(()),
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(ConfigError::EnvFile {
                path: ".env".to_string(),
                reason: e.to_string(),
            }),
        },
    }
}
