//! Health API Tests
//!
//! Tests for the liveness and connectivity endpoints and CORS headers.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use banco_tierras::db::DbError;
use banco_tierras::http_server::HttpServerConfig;

use common::{app, app_with_config, get_json, RecordingExecutor};

#[tokio::test]
async fn test_db_success() {
    let executor = Arc::new(RecordingExecutor::returning(Vec::new()));
    let (status, body) = get_json(app(executor.clone()), "/test-db").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Connection successful"}));
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_db_failure() {
    let executor = Arc::new(RecordingExecutor::failing(DbError::Connectivity(
        "connection refused".to_string(),
    )));
    let (status, body) = get_json(app(executor), "/test-db").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"message": "Connection failed: connection refused"})
    );
}

#[tokio::test]
async fn test_health_does_not_touch_database() {
    let executor = Arc::new(RecordingExecutor::failing(DbError::Connectivity(
        "down".to_string(),
    )));
    let (status, body) = get_json(app(executor), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let executor = Arc::new(RecordingExecutor::returning(Vec::new()));
    let response = app(executor)
        .oneshot(
            Request::builder()
                .uri("/proyectos/")
                .header(header::ORIGIN, "http://dashboard.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_origin_list() {
    let config = HttpServerConfig::default()
        .with_cors_origins(&["http://dashboard.example".to_string()])
        .unwrap();
    let executor = Arc::new(RecordingExecutor::returning(Vec::new()));
    let router = app_with_config(executor, config);

    let listed = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/proyectos/")
                .header(header::ORIGIN, "http://dashboard.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        listed
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://dashboard.example"
    );

    let unlisted = router
        .oneshot(
            Request::builder()
                .uri("/proyectos/")
                .header(header::ORIGIN, "http://elsewhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(unlisted
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_swagger_document() {
    let executor = Arc::new(RecordingExecutor::failing(DbError::Connectivity(
        "down".to_string(),
    )));
    let (status, body) = get_json(app(executor.clone()), "/swagger.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Banco de Tierras");
    assert_eq!(body["info"]["version"], "1.0");
    assert!(body["paths"]["/propiedades/"]["get"].is_object());
    assert!(executor.calls().is_empty());
}
