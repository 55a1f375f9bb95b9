//! Typed positional parameter binding.
//!
//! # Responsibility
//! - Bind optional values into prepared statements with a declared type.
//! - Reject parameter lists that do not match the statement shape.
//!
//! # Invariants
//! - Absent values are bound as SQL `NULL`; the declared type still travels
//!   with the parameter for diagnostics.
//! - Decimals are bound as exact scale-2 literals, never as floats.

use crate::model::decimal::Decimal;
use rusqlite::types::Value;
use rusqlite::Statement;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Semantic column type declared at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Decimal,
    Integer,
}

impl SqlType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
        }
    }
}

impl Display for SqlType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One statement parameter; the variant is its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlParam<'a> {
    Text(Option<&'a str>),
    Decimal(Option<Decimal>),
    Integer(Option<i64>),
}

impl SqlParam<'_> {
    pub fn declared_type(&self) -> SqlType {
        match self {
            Self::Text(_) => SqlType::Text,
            Self::Decimal(_) => SqlType::Decimal,
            Self::Integer(_) => SqlType::Integer,
        }
    }

    fn to_value(self) -> Value {
        match self {
            Self::Text(Some(value)) => Value::Text(value.to_string()),
            Self::Decimal(Some(value)) => Value::Text(value.to_string()),
            Self::Integer(Some(value)) => Value::Integer(value),
            Self::Text(None) | Self::Decimal(None) | Self::Integer(None) => Value::Null,
        }
    }
}

/// A parameter could not be bound.
///
/// `position` is the 1-based slot that failed; it is `None` when the
/// parameter list as a whole does not fit the statement.
#[derive(Debug)]
pub struct BindError {
    pub position: Option<usize>,
    pub declared: Option<SqlType>,
    pub reason: String,
    source: Option<rusqlite::Error>,
}

impl BindError {
    fn count_mismatch(expected: usize, actual: usize) -> Self {
        Self {
            position: None,
            declared: None,
            reason: format!("statement expects {expected} parameters, got {actual}"),
            source: None,
        }
    }
}

impl Display for BindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.position, self.declared) {
            (Some(position), Some(declared)) => write!(
                f,
                "cannot bind {declared} parameter at position {position}: {}",
                self.reason
            ),
            _ => write!(f, "cannot bind parameters: {}", self.reason),
        }
    }
}

impl Error for BindError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err as &(dyn Error + 'static))
    }
}

/// Binds one parameter at a 1-based `position`.
pub fn bind_param(
    stmt: &mut Statement<'_>,
    position: usize,
    param: &SqlParam<'_>,
) -> Result<(), BindError> {
    stmt.raw_bind_parameter(position, param.to_value())
        .map_err(|err| BindError {
            position: Some(position),
            declared: Some(param.declared_type()),
            reason: err.to_string(),
            source: Some(err),
        })
}

/// Binds every parameter in order after checking the statement arity.
pub fn bind_params(stmt: &mut Statement<'_>, params: &[SqlParam<'_>]) -> Result<(), BindError> {
    let expected = stmt.parameter_count();
    if expected != params.len() {
        return Err(BindError::count_mismatch(expected, params.len()));
    }

    for (index, param) in params.iter().enumerate() {
        bind_param(stmt, index + 1, param)?;
    }
    Ok(())
}
