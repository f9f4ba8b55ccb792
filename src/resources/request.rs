//! # Request Parsing
//!
//! Coerces raw query-string values into typed pagination, filter values and
//! mode flags for one resource. Coercion is all-or-nothing: the first bad
//! value rejects the request. Parameters a resource does not declare are
//! ignored.

use std::collections::{BTreeSet, HashMap};

use crate::config::parse_flag;
use crate::query::{Page, SqlParam, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

use super::errors::{ArgumentError, ArgumentResult};
use super::{FieldKind, Resource};

/// Typed arguments for one request against one resource
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    pub page: Page,
    /// One value per declared filter, in declaration order
    pub filters: Vec<SqlParam>,
    flags: BTreeSet<&'static str>,
}

impl ResourceRequest {
    /// Parse raw query parameters against a resource declaration
    pub fn parse(resource: &Resource, raw: &HashMap<String, String>) -> ArgumentResult<Self> {
        let page = Page::new(
            parse_int(raw, "page")?.unwrap_or(DEFAULT_PAGE),
            parse_int(raw, "page_size")?.unwrap_or(DEFAULT_PAGE_SIZE),
        );

        let filters = resource
            .filters
            .iter()
            .map(|field| coerce(field.param, field.kind, raw.get(field.param)))
            .collect::<ArgumentResult<Vec<_>>>()?;

        let mut flags = BTreeSet::new();
        for mode in resource.modes {
            if let SqlParam::Bool(Some(true)) =
                coerce(mode.flag(), FieldKind::Boolean, raw.get(mode.flag()))?
            {
                flags.insert(mode.flag());
            }
        }

        Ok(Self {
            page,
            filters,
            flags,
        })
    }

    /// Whether a mode flag was set to true
    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }
}

fn parse_int(raw: &HashMap<String, String>, param: &str) -> ArgumentResult<Option<i64>> {
    match coerce(param, FieldKind::Integer, raw.get(param))? {
        SqlParam::Int(value) => Ok(value),
        _ => Ok(None),
    }
}

fn null_of(kind: FieldKind) -> SqlParam {
    match kind {
        FieldKind::Text => SqlParam::Text(None),
        FieldKind::Integer => SqlParam::Int(None),
        FieldKind::Float => SqlParam::Float(None),
        FieldKind::Boolean => SqlParam::Bool(None),
    }
}

/// Coerce one raw value; absence is a typed NULL
fn coerce(param: &str, kind: FieldKind, raw: Option<&String>) -> ArgumentResult<SqlParam> {
    let Some(raw) = raw else {
        return Ok(null_of(kind));
    };
    let invalid = || ArgumentError::new(param, kind, raw.as_str());

    match kind {
        FieldKind::Text => Ok(SqlParam::Text(Some(raw.clone()))),
        FieldKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(|v| SqlParam::Int(Some(v)))
            .map_err(|_| invalid()),
        FieldKind::Float => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| SqlParam::Float(Some(v)))
            .ok_or_else(invalid),
        FieldKind::Boolean => parse_flag(raw)
            .map(|v| SqlParam::Bool(Some(v)))
            .ok_or_else(invalid),
    }
}
