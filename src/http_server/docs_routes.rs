//! API Document Route
//!
//! Serves the registry-generated OpenAPI document at `/swagger.json`.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::resources::api_document;

use super::server::AppState;

/// Create documentation routes
pub fn docs_routes() -> Router<AppState> {
    Router::new().route("/swagger.json", get(swagger_handler))
}

async fn swagger_handler() -> Json<Value> {
    Json(api_document())
}
