//! Database access errors
//!
//! None of these are fatal to the service; each one fails a single request.

use thiserror::Error;

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Database access errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DbError {
    /// The configured host name did not resolve to an address
    #[error("could not resolve database host '{host}': {reason}")]
    HostResolution { host: String, reason: String },

    /// The database could not be reached or refused the session
    #[error("{0}")]
    Connectivity(String),

    /// The database rejected or failed the statement
    #[error("{0}")]
    Query(String),
}

impl DbError {
    /// Stable kind name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            DbError::HostResolution { .. } => "host_resolution",
            DbError::Connectivity(_) => "connectivity",
            DbError::Query(_) => "query",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_pass_through() {
        let err = DbError::Query("relation \"propiedades\" does not exist".to_string());
        assert_eq!(err.to_string(), "relation \"propiedades\" does not exist");
        assert_eq!(err.kind(), "query");
    }

    #[test]
    fn test_host_resolution_message() {
        let err = DbError::HostResolution {
            host: "db.invalid".to_string(),
            reason: "no addresses".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not resolve database host 'db.invalid': no addresses"
        );
        assert_eq!(err.kind(), "host_resolution");
    }
}
