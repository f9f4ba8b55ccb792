//! # Filter Predicates
//!
//! Optional predicates and the typed parameter values they bind.

use serde::Serialize;

/// Comparison applied by an optional predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparison {
    /// Equals
    #[serde(rename = "eq")]
    Eq,

    /// Greater than
    #[serde(rename = "gt")]
    Gt,
}

impl Comparison {
    /// SQL operator text
    pub fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Gt => ">",
        }
    }
}

/// A bound query parameter
///
/// NULLs keep their type so the database can resolve `$n IS NULL` without
/// guessing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlParam {
    Text(Option<String>),
    Int(Option<i64>),
    Float(Option<f64>),
    Bool(Option<bool>),
}

impl SqlParam {
    pub fn is_null(&self) -> bool {
        match self {
            SqlParam::Text(v) => v.is_none(),
            SqlParam::Int(v) => v.is_none(),
            SqlParam::Float(v) => v.is_none(),
            SqlParam::Bool(v) => v.is_none(),
        }
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(Some(value))
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(Some(value.to_string()))
    }
}

/// `(value IS NULL OR column <op> value)`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub comparison: Comparison,
    pub value: SqlParam,
}

impl Predicate {
    pub fn new(column: impl Into<String>, comparison: Comparison, value: SqlParam) -> Self {
        Self {
            column: column.into(),
            comparison,
            value,
        }
    }

    /// Equality predicate
    pub fn eq(column: impl Into<String>, value: SqlParam) -> Self {
        Self::new(column, Comparison::Eq, value)
    }

    /// Strict lower-bound predicate
    pub fn gt(column: impl Into<String>, value: SqlParam) -> Self {
        Self::new(column, Comparison::Gt, value)
    }

    /// Render with the two placeholders starting at `first`
    pub(crate) fn to_sql(&self, first: usize) -> String {
        format!(
            "(${} IS NULL OR {} {} ${})",
            first,
            self.column,
            self.comparison.as_sql(),
            first + 1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_predicate_sql() {
        let p = Predicate::eq("propiedades.proyecto_id", SqlParam::Int(Some(3)));
        assert_eq!(
            p.to_sql(3),
            "($3 IS NULL OR propiedades.proyecto_id = $4)"
        );
    }

    #[test]
    fn test_gt_predicate_sql() {
        let p = Predicate::gt("propiedades.adeudo_predial", SqlParam::Int(None));
        assert_eq!(
            p.to_sql(1),
            "($1 IS NULL OR propiedades.adeudo_predial > $2)"
        );
    }

    #[test]
    fn test_typed_nulls() {
        assert!(SqlParam::Text(None).is_null());
        assert!(SqlParam::Float(None).is_null());
        assert!(!SqlParam::Bool(Some(false)).is_null());
        assert_ne!(SqlParam::Text(None), SqlParam::Int(None));
    }
}
