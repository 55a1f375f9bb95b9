//! Error kind surfaced by every repository operation.

use crate::db::{BindError, DbError, ExtractError};
use crate::model::project::{ProjectId, ProjectValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Database-layer failure for project persistence and queries.
///
/// Failures raised inside a unit of work arrive wrapped in
/// [`RepoError::Transaction`]; the original failure stays reachable through
/// `source()` and [`RepoError::root_cause`].
#[derive(Debug)]
pub enum RepoError {
    /// A connection could not be acquired or bootstrapped.
    Connection(DbError),
    Bind(BindError),
    Extract(ExtractError),
    /// A statement failed in the store.
    Statement(rusqlite::Error),
    Validation(ProjectValidationError),
    /// Insert was handed a project that already has an id.
    AlreadyPersisted(ProjectId),
    /// Update was handed a project that was never inserted.
    MissingProjectId,
    /// A keyed write touched more rows than a primary key allows.
    Integrity {
        operation: &'static str,
        affected: usize,
    },
    /// The unit of work failed and was rolled back.
    Transaction {
        operation: &'static str,
        source: Box<RepoError>,
    },
}

impl RepoError {
    /// Returns the innermost non-transaction failure.
    pub fn root_cause(&self) -> &RepoError {
        match self {
            Self::Transaction { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection_failed",
            Self::Bind(_) => "bind_failed",
            Self::Extract(_) => "extract_failed",
            Self::Statement(_) => "statement_failed",
            Self::Validation(_) => "validation_failed",
            Self::AlreadyPersisted(_) => "already_persisted",
            Self::MissingProjectId => "missing_project_id",
            Self::Integrity { .. } => "integrity_violation",
            Self::Transaction { source, .. } => source.code(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(err) => write!(f, "cannot connect to database: {err}"),
            Self::Bind(err) => write!(f, "{err}"),
            Self::Extract(err) => write!(f, "{err}"),
            Self::Statement(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::AlreadyPersisted(id) => write!(f, "project {id} is already persisted"),
            Self::MissingProjectId => write!(f, "project has no id; insert it first"),
            Self::Integrity {
                operation,
                affected,
            } => write!(
                f,
                "{operation} affected {affected} rows where at most one was expected"
            ),
            Self::Transaction { operation, source } => {
                write!(f, "{operation} rolled back: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection(err) => Some(err),
            Self::Bind(err) => Some(err),
            Self::Extract(err) => Some(err),
            Self::Statement(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Transaction { source, .. } => Some(source.as_ref()),
            Self::AlreadyPersisted(_) | Self::MissingProjectId | Self::Integrity { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Connection(value)
    }
}

impl From<BindError> for RepoError {
    fn from(value: BindError) -> Self {
        Self::Bind(value)
    }
}

impl From<ExtractError> for RepoError {
    fn from(value: ExtractError) -> Self {
        Self::Extract(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Statement(value)
    }
}

impl From<ProjectValidationError> for RepoError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}
