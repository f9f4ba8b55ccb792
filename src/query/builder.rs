//! # Select Builder
//!
//! Assembles a paginated SELECT whose optional predicates each contribute a
//! `($k IS NULL OR column <op> $k+1)` clause. One statement shape serves both
//! the filtered and unfiltered case; the price is binding every value twice.

use super::filter::{Predicate, SqlParam};
use super::page::Page;

/// SQL text plus its positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl BuiltQuery {
    /// Single-row aggregate over a whole source
    ///
    /// Takes no parameters and no pagination.
    pub fn aggregate(source: &str, expression: &str, condition: Option<&str>) -> Self {
        let mut sql = format!("SELECT {} FROM {}", expression, source);
        if let Some(condition) = condition {
            sql.push_str(" WHERE ");
            sql.push_str(condition);
        }
        Self {
            sql,
            params: Vec::new(),
        }
    }
}

/// Builder for a filtered, paginated SELECT
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    source: String,
    projection: Vec<String>,
    predicates: Vec<Predicate>,
    conditions: Vec<String>,
    page: Option<Page>,
}

impl SelectBuilder {
    pub fn new<I, S>(source: impl Into<String>, projection: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source: source.into(),
            projection: projection.into_iter().map(Into::into).collect(),
            predicates: Vec::new(),
            conditions: Vec::new(),
            page: None,
        }
    }

    /// Add an optional predicate; order of calls is parameter order
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Add a fixed, parameterless condition after the predicates
    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    pub fn paginate(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn build(self) -> BuiltQuery {
        let mut sql = format!("SELECT {} FROM {}", self.projection.join(", "), self.source);
        let mut params = Vec::with_capacity(self.predicates.len() * 2 + 2);
        let mut clauses = Vec::with_capacity(self.predicates.len() + self.conditions.len());

        for predicate in self.predicates {
            clauses.push(predicate.to_sql(params.len() + 1));
            params.push(predicate.value.clone());
            params.push(predicate.value);
        }
        clauses.extend(self.conditions.into_iter().map(|c| format!("({})", c)));

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        if let Some(page) = self.page {
            sql.push_str(&format!(
                " LIMIT ${} OFFSET ${}",
                params.len() + 1,
                params.len() + 2
            ));
            params.push(SqlParam::Int(Some(page.page_size)));
            params.push(SqlParam::Int(Some(page.offset())));
        }

        BuiltQuery { sql, params }
    }
}
