//! Shared test helpers: an in-memory executor that records every query.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{Map, Value};
use tower::ServiceExt;

use banco_tierras::db::{DbError, DbResult, QueryExecutor, Record};
use banco_tierras::http_server::{AppState, HttpServer, HttpServerConfig};
use banco_tierras::query::BuiltQuery;

/// One call observed by the executor
#[derive(Debug, Clone)]
pub struct ExecutedQuery {
    pub query: BuiltQuery,
    pub columns: Vec<String>,
}

/// Executor returning canned results
pub struct RecordingExecutor {
    rows: Vec<Vec<Value>>,
    query_error: Option<DbError>,
    ping_error: Option<DbError>,
    calls: Mutex<Vec<ExecutedQuery>>,
}

impl RecordingExecutor {
    pub fn returning(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows,
            query_error: None,
            ping_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DbError) -> Self {
        Self {
            query_error: Some(error.clone()),
            ping_error: Some(error),
            ..Self::returning(Vec::new())
        }
    }

    pub fn calls(&self) -> Vec<ExecutedQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for RecordingExecutor {
    async fn execute(&self, query: &BuiltQuery, columns: &[&str]) -> DbResult<Vec<Record>> {
        self.calls.lock().unwrap().push(ExecutedQuery {
            query: query.clone(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        });

        if let Some(e) = &self.query_error {
            return Err(e.clone());
        }

        Ok(self
            .rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .zip(row.iter())
                    .map(|(c, v)| (c.to_string(), v.clone()))
                    .collect::<Map<String, Value>>()
            })
            .collect())
    }

    async fn ping(&self) -> DbResult<()> {
        match &self.ping_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

/// Router wired to a shared recording executor
pub fn app(executor: Arc<RecordingExecutor>) -> Router {
    HttpServer::new(AppState::from_arc(executor)).router()
}

/// Router with an explicit server configuration
pub fn app_with_config(executor: Arc<RecordingExecutor>, config: HttpServerConfig) -> Router {
    HttpServer::with_config(config, AppState::from_arc(executor)).router()
}

/// Issue a GET and decode the JSON body
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}
