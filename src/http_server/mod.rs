//! # HTTP Server
//!
//! Read-only JSON API over the land bank database: one listing route per
//! resource, liveness and connectivity checks, and a generated API document.

mod config;
mod docs_routes;
mod errors;
mod health_routes;
mod resource_routes;
mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, MessageResponse};
pub use health_routes::HealthResponse;
pub use server::{AppState, HttpServer};
