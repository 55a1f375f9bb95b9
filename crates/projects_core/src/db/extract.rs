//! Column-by-name extraction with declared-type coercion.
//!
//! # Responsibility
//! - Read one named column from a result row.
//! - Coerce the stored value into the declared semantic type.
//!
//! # Invariants
//! - Columns are always addressed by name, never by ordinal.
//! - Decimal columns yield scale-2 values whatever storage class SQLite used.

use super::bind::SqlType;
use crate::model::decimal::Decimal;
use rusqlite::types::ValueRef;
use rusqlite::Row;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// What went wrong while extracting a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractErrorKind {
    MissingColumn,
    UnexpectedNull,
    TypeMismatch {
        expected: SqlType,
        found: &'static str,
    },
    OutOfRange(String),
}

/// A column could not be mapped onto its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractError {
    pub column: &'static str,
    pub kind: ExtractErrorKind,
}

impl ExtractError {
    fn new(column: &'static str, kind: ExtractErrorKind) -> Self {
        Self { column, kind }
    }
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExtractErrorKind::MissingColumn => {
                write!(f, "result set has no column `{}`", self.column)
            }
            ExtractErrorKind::UnexpectedNull => {
                write!(f, "column `{}` is null but not optional", self.column)
            }
            ExtractErrorKind::TypeMismatch { expected, found } => write!(
                f,
                "column `{}` holds {found}, expected {expected}",
                self.column
            ),
            ExtractErrorKind::OutOfRange(detail) => {
                write!(f, "column `{}` is out of range: {detail}", self.column)
            }
        }
    }
}

impl Error for ExtractError {}

pub type ExtractResult<T> = Result<T, ExtractError>;

pub fn text(row: &Row<'_>, column: &'static str) -> ExtractResult<String> {
    optional_text(row, column)?.ok_or_else(|| null_error(column))
}

pub fn optional_text(row: &Row<'_>, column: &'static str) -> ExtractResult<Option<String>> {
    match value(row, column)? {
        ValueRef::Null => Ok(None),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|value| Some(value.to_string()))
            .map_err(|err| {
                ExtractError::new(column, ExtractErrorKind::OutOfRange(err.to_string()))
            }),
        other => Err(mismatch(column, SqlType::Text, other)),
    }
}

pub fn integer<T: TryFrom<i64>>(row: &Row<'_>, column: &'static str) -> ExtractResult<T> {
    optional_integer(row, column)?.ok_or_else(|| null_error(column))
}

/// Reads an integer column and narrows it to `T`.
pub fn optional_integer<T: TryFrom<i64>>(
    row: &Row<'_>,
    column: &'static str,
) -> ExtractResult<Option<T>> {
    let raw = match value(row, column)? {
        ValueRef::Null => return Ok(None),
        ValueRef::Integer(raw) => raw,
        other => return Err(mismatch(column, SqlType::Integer, other)),
    };

    T::try_from(raw).map(Some).map_err(|_| {
        ExtractError::new(
            column,
            ExtractErrorKind::OutOfRange(format!("{raw} does not fit the declared width")),
        )
    })
}

/// Reads a numeric column as a scale-2 decimal.
///
/// NUMERIC affinity stores `12.50` as REAL and `12.00` as INTEGER; text is
/// accepted for values that failed numeric conversion on write.
pub fn optional_decimal(row: &Row<'_>, column: &'static str) -> ExtractResult<Option<Decimal>> {
    let out_of_range =
        |detail: String| ExtractError::new(column, ExtractErrorKind::OutOfRange(detail));

    match value(row, column)? {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(whole) => Decimal::from_whole(whole)
            .map(Some)
            .ok_or_else(|| out_of_range(whole.to_string())),
        ValueRef::Real(real) => Decimal::from_f64_rounded(real)
            .map(Some)
            .map_err(|err| out_of_range(err.to_string())),
        ValueRef::Text(bytes) => {
            let raw = std::str::from_utf8(bytes).map_err(|err| out_of_range(err.to_string()))?;
            raw.parse::<Decimal>()
                .map(Some)
                .map_err(|err| out_of_range(err.to_string()))
        }
        other => Err(mismatch(column, SqlType::Decimal, other)),
    }
}

fn value<'row>(row: &'row Row<'_>, column: &'static str) -> ExtractResult<ValueRef<'row>> {
    row.get_ref(column).map_err(|err| match err {
        rusqlite::Error::InvalidColumnName(_) => {
            ExtractError::new(column, ExtractErrorKind::MissingColumn)
        }
        other => ExtractError::new(column, ExtractErrorKind::OutOfRange(other.to_string())),
    })
}

fn null_error(column: &'static str) -> ExtractError {
    ExtractError::new(column, ExtractErrorKind::UnexpectedNull)
}

fn mismatch(column: &'static str, expected: SqlType, found: ValueRef<'_>) -> ExtractError {
    let found = match found {
        ValueRef::Null => "null",
        ValueRef::Integer(_) => "integer",
        ValueRef::Real(_) => "real",
        ValueRef::Text(_) => "text",
        ValueRef::Blob(_) => "blob",
    };
    ExtractError::new(column, ExtractErrorKind::TypeMismatch { expected, found })
}
