//! # HTTP Server
//!
//! Main HTTP server combining the resource and health routers.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::QueryExecutor;
use crate::observability::Event;
use crate::resources::registry;

use super::config::HttpServerConfig;
use super::docs_routes::docs_routes;
use super::health_routes::health_routes;
use super::resource_routes::resource_routes;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    executor: Arc<dyn QueryExecutor>,
}

impl AppState {
    pub fn new(executor: impl QueryExecutor + 'static) -> Self {
        Self {
            executor: Arc::new(executor),
        }
    }

    pub fn from_arc(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &dyn QueryExecutor {
        self.executor.as_ref()
    }
}

/// HTTP Server for the land bank API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new(state: AppState) -> Self {
        Self::with_config(HttpServerConfig::default(), state)
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, state: AppState) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.cors_origins.clone()))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(docs_routes())
            .merge(resource_routes())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(state)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        info!(
            event = %Event::ServerStarting,
            addr = %self.config.socket_addr(),
            resources = registry().len(),
            "binding listener"
        );

        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let local_addr = listener.local_addr()?;

        info!(
            event = %Event::Serving,
            addr = %local_addr,
            "land bank API available at http://{}",
            local_addr
        );

        axum::serve(listener, self.router).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DbResult, Record};
    use crate::query::BuiltQuery;
    use async_trait::async_trait;

    struct NoopExecutor;

    #[async_trait]
    impl QueryExecutor for NoopExecutor {
        async fn execute(&self, _query: &BuiltQuery, _columns: &[&str]) -> DbResult<Vec<Record>> {
            Ok(Vec::new())
        }

        async fn ping(&self) -> DbResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(AppState::new(NoopExecutor));
        assert_eq!(server.socket_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig {
            port: 8080,
            ..Default::default()
        };
        let server = HttpServer::with_config(config, AppState::new(NoopExecutor));
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }
}
