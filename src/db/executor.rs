//! # Query Executor
//!
//! Runs a built query on a fresh connection and materializes the whole
//! result set as records.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;
use tracing::{error, info};

use crate::observability::Event;
use crate::query::{BuiltQuery, SqlParam};

use super::connection::{release, Connector};
use super::errors::{DbError, DbResult};
use super::row::{decode_row, zip_record, Record};

/// Read-side database access used by the HTTP layer
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute a query and zip each row with `columns`
    ///
    /// Zero matching rows is an empty list, not an error.
    async fn execute(&self, query: &BuiltQuery, columns: &[&str]) -> DbResult<Vec<Record>>;

    /// Open and close a connection without running a statement
    async fn ping(&self) -> DbResult<()>;
}

/// PostgreSQL executor, one connection per call
#[derive(Debug, Clone)]
pub struct PgExecutor {
    connector: Connector,
}

impl PgExecutor {
    pub fn new(connector: Connector) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    async fn execute(&self, query: &BuiltQuery, columns: &[&str]) -> DbResult<Vec<Record>> {
        let mut conn = self.connector.open().await?;

        // The connection is released before the outcome is inspected; a
        // panic or a dropped future closes the socket on drop instead.
        let fetched = bind_params(sqlx::query(&query.sql), &query.params)
            .fetch_all(&mut conn)
            .await;
        release(conn).await;

        let rows = fetched.map_err(|e| {
            error!(
                event = %Event::QueryFailed,
                sql = %query.sql,
                error = %e,
                "database error"
            );
            DbError::Query(e.to_string())
        })?;

        let records = rows
            .iter()
            .map(|row| decode_row(row).and_then(|values| zip_record(columns, values)))
            .collect::<DbResult<Vec<_>>>()
            .inspect_err(|e| {
                error!(event = %Event::QueryFailed, sql = %query.sql, error = %e, "row mapping failed")
            })?;

        info!(
            event = %Event::QueryExecuted,
            rows = records.len(),
            params = query.params.len(),
            "query executed"
        );
        Ok(records)
    }

    async fn ping(&self) -> DbResult<()> {
        let conn = self.connector.open().await?;
        release(conn).await;
        Ok(())
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[SqlParam],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Text(v) => query.bind(v.clone()),
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Float(v) => query.bind(*v),
            SqlParam::Bool(v) => query.bind(*v),
        };
    }
    query
}
