//! Connection acquisition seam.
//!
//! # Responsibility
//! - Hand out one ready-to-use connection per unit of work.
//! - Allow pooled implementations to replace the file-backed one.
//!
//! # Invariants
//! - Every acquired connection is independent; nothing is shared between calls.
//! - Dropping the returned handle releases the connection.

use super::config::DbConfig;
use super::open::open_db_with_config;
use super::DbResult;
use rusqlite::Connection;
use std::borrow::BorrowMut;

/// Source of connections for repository operations.
///
/// `Conn` only has to lend a `&mut Connection`, so a pool can return its own
/// guard type and release on drop.
pub trait ConnectionProvider {
    type Conn: BorrowMut<Connection>;

    fn acquire(&self) -> DbResult<Self::Conn>;
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    type Conn = P::Conn;

    fn acquire(&self) -> DbResult<Self::Conn> {
        (**self).acquire()
    }
}

/// Opens a new file-backed connection on every `acquire`.
#[derive(Debug, Clone)]
pub struct FileConnectionProvider {
    config: DbConfig,
}

impl FileConnectionProvider {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }
}

impl ConnectionProvider for FileConnectionProvider {
    type Conn = Connection;

    fn acquire(&self) -> DbResult<Connection> {
        open_db_with_config(&self.config)
    }
}
