//! SQLite storage bootstrap and low-level statement plumbing.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the projects core.
//! - Apply the embedded schema in deterministic order.
//! - Bind typed parameters and extract typed columns by name.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write project data before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod bind;
pub mod config;
pub mod extract;
pub mod migrations;
mod open;
pub mod provider;

pub use bind::{bind_param, bind_params, BindError, SqlParam, SqlType};
pub use config::DbConfig;
pub use extract::{ExtractError, ExtractErrorKind};
pub use open::{open_db, open_db_in_memory, open_db_with_config};
pub use provider::{ConnectionProvider, FileConnectionProvider};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
