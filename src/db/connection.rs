//! # Connection Provider
//!
//! Opens one dedicated, TLS-required PostgreSQL connection per call. There is
//! no pool: the caller owns the connection and closes it when done.

use std::net::IpAddr;

use sqlx::postgres::{PgConnectOptions, PgConnection, PgSslMode};
use sqlx::Connection;
use tracing::{debug, info, warn};

use crate::config::{DatabaseConfig, SslMode};
use crate::observability::Event;

use super::errors::{DbError, DbResult};

/// `application_name` reported to the server for every connection
pub const APPLICATION_NAME: &str = "banco-tierras";

/// Opens connections from an immutable configuration
#[derive(Debug, Clone)]
pub struct Connector {
    config: DatabaseConfig,
}

impl Connector {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// Connection options for the given host (name or address)
    pub fn connect_options(&self, host: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(host)
            .port(self.config.port)
            .username(&self.config.user)
            .password(&self.config.password)
            .database(&self.config.database)
            .application_name(APPLICATION_NAME)
            .ssl_mode(pg_ssl_mode(self.config.ssl_mode))
    }

    /// Open a new connection
    pub async fn open(&self) -> DbResult<PgConnection> {
        let host = if self.config.resolve_host {
            resolve_host(&self.config.host, self.config.port)
                .await?
                .to_string()
        } else {
            self.config.host.clone()
        };

        match PgConnection::connect_with(&self.connect_options(&host)).await {
            Ok(conn) => {
                info!(
                    event = %Event::ConnectionOpened,
                    host = %host,
                    port = self.config.port,
                    database = %self.config.database,
                    "connected to the database"
                );
                Ok(conn)
            }
            Err(e) => {
                warn!(
                    event = %Event::ConnectionFailed,
                    host = %host,
                    port = self.config.port,
                    error = %e,
                    "error connecting to the database"
                );
                Err(DbError::Connectivity(e.to_string()))
            }
        }
    }
}

fn pg_ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
        SslMode::VerifyCa => PgSslMode::VerifyCa,
        SslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

/// Close a connection
///
/// Close failures are logged, never returned.
pub async fn release(conn: PgConnection) {
    match conn.close().await {
        Ok(()) => debug!(event = %Event::ConnectionClosed, "connection closed"),
        Err(e) => warn!(
            event = %Event::ConnectionClosed,
            error = %e,
            "connection closed uncleanly"
        ),
    }
}

/// Resolve a host name to an address, preferring IPv4
///
/// Address literals are returned as-is without a lookup.
pub async fn resolve_host(host: &str, port: u16) -> DbResult<IpAddr> {
    if let Ok(addr) = host.parse::<IpAddr>() {
        return Ok(addr);
    }

    let failure = |reason: String| {
        warn!(
            event = %Event::HostResolutionFailed,
            host = %host,
            reason = %reason,
            "database host did not resolve"
        );
        DbError::HostResolution {
            host: host.to_string(),
            reason,
        }
    };

    let addrs: Vec<_> = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| failure(e.to_string()))?
        .map(|sa| sa.ip())
        .collect();

    let chosen = addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| failure("no addresses returned".to_string()))?;

    info!(event = %Event::HostResolved, host = %host, address = %chosen);
    Ok(chosen)
}
