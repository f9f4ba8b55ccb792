//! Configuration errors
//!
//! Every configuration error is fatal: the server refuses to start.

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while resolving process configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable is set but cannot be interpreted
    #[error("Invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },

    /// A CORS origin is not a valid header value
    #[error("Invalid CORS origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    /// The dotenv file exists but could not be read
    #[error("Failed to load env file {path}: {reason}")]
    EnvFile { path: String, reason: String },
}
