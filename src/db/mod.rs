//! # Database Access
//!
//! Connection provider, query executor and row mapping over PostgreSQL.
//! Every execution uses its own connection; nothing is pooled or shared.

pub mod connection;
pub mod errors;
pub mod executor;
pub mod row;

pub use connection::{resolve_host, Connector};
pub use errors::{DbError, DbResult};
pub use executor::{PgExecutor, QueryExecutor};
pub use row::Record;
