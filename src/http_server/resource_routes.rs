//! Resource HTTP Routes
//!
//! One `GET /<resource>/` route per registry entry, all served by the same
//! generic handler. The slash-less path is an alias.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{debug, error, warn};

use crate::db::Record;
use crate::observability::Event;
use crate::resources::{registry, Resource, ResourceRequest};

use super::errors::ApiError;
use super::server::AppState;

/// Create resource routes
pub fn resource_routes() -> Router<AppState> {
    registry().iter().fold(Router::new(), |router, resource| {
        let handler = move |State(state): State<AppState>,
                            Query(raw): Query<HashMap<String, String>>| async move {
            list_resource(&state, resource, &raw).await
        };
        debug!(
            resource = resource.name,
            description = resource.description,
            "route registered"
        );

        router
            .route(&format!("/{}/", resource.name), get(handler))
            .route(&format!("/{}", resource.name), get(handler))
    })
}

/// Parse, plan and execute one listing request
pub async fn list_resource(
    state: &AppState,
    resource: &'static Resource,
    raw: &HashMap<String, String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let request = ResourceRequest::parse(resource, raw).inspect_err(|e| {
        warn!(
            event = %Event::RequestRejected,
            resource = resource.name,
            error = %e,
            "invalid query parameter"
        )
    })?;

    let plan = resource.plan(&request);
    let records = state
        .executor()
        .execute(&plan.query, &plan.columns)
        .await
        .inspect_err(|e| {
            error!(
                event = %Event::QueryFailed,
                resource = resource.name,
                kind = e.kind(),
                error = %e,
                "resource query failed"
            )
        })?;

    Ok(Json(records))
}
