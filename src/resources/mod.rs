//! # Resources
//!
//! Declarative description of every readable resource: where its rows come
//! from, which columns it returns, which optional filters it accepts and
//! which alternate modes it supports. One generic planner turns a parsed
//! request into a query for any of them.

mod catalog;
pub mod docs;
pub mod errors;
pub mod request;

pub use catalog::{find, registry};
pub use docs::api_document;
pub use errors::{ArgumentError, ArgumentResult};
pub use request::ResourceRequest;

use crate::query::{BuiltQuery, Comparison, Predicate, SelectBuilder};

/// Scalar type of a query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
}

impl FieldKind {
    /// Human description used in client-facing errors
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Integer => "an integer",
            FieldKind::Float => "a number",
            FieldKind::Boolean => "a boolean",
        }
    }

    /// OpenAPI schema type
    pub fn schema_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "number",
            FieldKind::Boolean => "boolean",
        }
    }
}

/// An output column: SQL expression and the name it is served under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub expr: &'static str,
    pub name: &'static str,
}

/// An optional filter accepted as a query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub param: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
    pub comparison: Comparison,
    pub help: &'static str,
}

/// Alternate response shape selected by a boolean parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Single-row aggregate; filters and pagination are ignored
    Aggregate {
        flag: &'static str,
        expr: &'static str,
        column: &'static str,
        condition: Option<&'static str>,
        help: &'static str,
    },
    /// Normal listing narrowed by a fixed condition
    Restrict {
        flag: &'static str,
        condition: &'static str,
        help: &'static str,
    },
}

impl Mode {
    pub fn flag(&self) -> &'static str {
        match self {
            Mode::Aggregate { flag, .. } | Mode::Restrict { flag, .. } => *flag,
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            Mode::Aggregate { help, .. } | Mode::Restrict { help, .. } => *help,
        }
    }
}

/// A readable resource
#[derive(Debug)]
pub struct Resource {
    /// Route segment, `GET /<name>/`
    pub name: &'static str,
    pub description: &'static str,
    /// Table or join the rows come from
    pub source: &'static str,
    pub columns: &'static [Column],
    pub filters: &'static [FilterField],
    /// Checked in order; the first active flag wins
    pub modes: &'static [Mode],
}

/// Query plus the names its result columns are served under
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub query: BuiltQuery,
    pub columns: Vec<&'static str>,
}

impl Resource {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Build the query answering `request`
    pub fn plan(&self, request: &ResourceRequest) -> Plan {
        let active = self.modes.iter().find(|m| request.flag(m.flag()));

        if let Some(Mode::Aggregate {
            expr,
            column,
            condition,
            ..
        }) = active
        {
            let projection = format!("{} AS {}", expr, column);
            return Plan {
                query: BuiltQuery::aggregate(self.source, &projection, *condition),
                columns: vec![*column],
            };
        }

        let mut builder = SelectBuilder::new(self.source, self.columns.iter().map(|c| c.expr));
        for (field, value) in self.filters.iter().zip(&request.filters) {
            builder = builder.filter(Predicate::new(field.column, field.comparison, value.clone()));
        }
        if let Some(Mode::Restrict { condition, .. }) = active {
            builder = builder.condition(*condition);
        }

        Plan {
            query: builder.paginate(request.page).build(),
            columns: self.column_names(),
        }
    }
}
