//! banco-tierras - read-only JSON API over the land bank database
//!
//! Layers, bottom up: environment configuration, query building,
//! per-request PostgreSQL access, the resource registry, and the HTTP server.

pub mod cli;
pub mod config;
pub mod db;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod resources;
