//! # HTTP Errors
//!
//! Maps request and database failures to responses. Every error body is
//! `{"message": <text>}`.
//!
//! Database failures on resource listings answer `200`, not `5xx`, so
//! existing clients that branch on the body keep working. Only argument
//! coercion failures use a client-error status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DbError;
use crate::resources::ArgumentError;

/// Errors surfaced by resource handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// A query parameter did not coerce to its declared type
    #[error(transparent)]
    InvalidArgument(#[from] ArgumentError),

    /// Host resolution, connection or query failure
    #[error(transparent)]
    Database(#[from] DbError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::OK,
        }
    }
}

/// `{"message": ...}` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
