//! # Query Building
//!
//! Optional-filter predicates, pagination and the SELECT builder shared by
//! every resource.

pub mod builder;
pub mod filter;
pub mod page;

pub use builder::{BuiltQuery, SelectBuilder};
pub use filter::{Comparison, Predicate, SqlParam};
pub use page::{Page, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
