//! Observable events for the Banco de Tierras API
//!
//! Events are explicit and typed. Each one is attached to a log record as
//! its `event` field.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration resolved from the environment
    ConfigLoaded,
    /// Configuration could not be resolved; the process exits
    ConfigFailed,
    /// HTTP listener about to bind
    ServerStarting,
    /// HTTP listener bound, accepting requests
    Serving,

    // Database connections
    /// Host name resolved to an address
    HostResolved,
    /// Host name could not be resolved
    HostResolutionFailed,
    /// Connection established
    ConnectionOpened,
    /// Connection attempt failed
    ConnectionFailed,
    /// Connection closed
    ConnectionClosed,

    // Queries
    /// Query executed successfully
    QueryExecuted,
    /// Query failed in the database
    QueryFailed,

    // Requests
    /// Request rejected before reaching the database
    RequestRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ConfigFailed => "CONFIG_FAILED",
            Event::ServerStarting => "SERVER_STARTING",
            Event::Serving => "SERVER_SERVING",

            Event::HostResolved => "DB_HOST_RESOLVED",
            Event::HostResolutionFailed => "DB_HOST_RESOLUTION_FAILED",
            Event::ConnectionOpened => "DB_CONNECTION_OPENED",
            Event::ConnectionFailed => "DB_CONNECTION_FAILED",
            Event::ConnectionClosed => "DB_CONNECTION_CLOSED",

            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::QueryFailed => "QUERY_FAILED",

            Event::RequestRejected => "REQUEST_REJECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::ConfigFailed,
            Event::ServerStarting,
            Event::Serving,
            Event::HostResolved,
            Event::HostResolutionFailed,
            Event::ConnectionOpened,
            Event::ConnectionFailed,
            Event::ConnectionClosed,
            Event::QueryExecuted,
            Event::QueryFailed,
            Event::RequestRejected,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Event::ConnectionOpened.to_string(), "DB_CONNECTION_OPENED");
    }
}
