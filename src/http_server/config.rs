//! HTTP Server Configuration
//!
//! Bind address and CORS policy. Origins are validated when set, so the
//! server never starts with a policy that silently drops one.

use axum::http::HeaderValue;

use crate::config::{ConfigError, ConfigResult};

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    pub host: String,

    /// Port to bind to (default: 5000)
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    pub(super) cors_origins: Vec<HeaderValue>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Restrict CORS to `origins`; any invalid origin rejects the whole list
    pub fn with_cors_origins(mut self, origins: &[String]) -> ConfigResult<Self> {
        self.cors_origins = origins
            .iter()
            .map(|origin| parse_origin(origin))
            .collect::<ConfigResult<_>>()?;
        Ok(self)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origin(origin: &str) -> ConfigResult<HeaderValue> {
    let invalid = |reason: &str| ConfigError::InvalidOrigin {
        origin: origin.to_string(),
        reason: reason.to_string(),
    };

    if origin.trim().is_empty() {
        return Err(invalid("empty origin"));
    }
    HeaderValue::from_str(origin).map_err(|e| invalid(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:5000");
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_valid_origins() {
        let config = HttpServerConfig::default()
            .with_cors_origins(&["http://localhost:3000".to_string()])
            .unwrap();
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_control_character_in_origin_is_rejected() {
        let err = HttpServerConfig::default()
            .with_cors_origins(&[
                "http://ok.example".to_string(),
                "http://bad\norigin".to_string(),
            ])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrigin { ref origin, .. } if origin == "http://bad\norigin"));
    }

    #[test]
    fn test_empty_origin_is_rejected() {
        assert!(HttpServerConfig::default()
            .with_cors_origins(&[" ".to_string()])
            .is_err());
    }
}
