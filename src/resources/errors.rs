//! Request argument errors

use thiserror::Error;

use super::FieldKind;

/// Result type for argument parsing
pub type ArgumentResult<T> = Result<T, ArgumentError>;

/// A query parameter failed to coerce to its declared type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for '{param}': expected {expected}, got '{value}'")]
pub struct ArgumentError {
    pub param: String,
    pub expected: &'static str,
    pub value: String,
}

impl ArgumentError {
    pub fn new(param: impl Into<String>, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            expected: kind.describe(),
            value: value.into(),
        }
    }
}
