//! Unit-of-work demarcation.
//!
//! # Responsibility
//! - Run repository work inside one transaction per acquired connection.
//! - Commit on success; roll back on any failure before reporting it.
//!
//! # Invariants
//! - The connection is back in autocommit mode when these functions return.
//! - Failures from the work closure come back as `RepoError::Transaction`
//!   with the original error as source.
//! - The connection is released when the unit of work ends, on every path.

use super::error::{RepoError, RepoResult};
use crate::db::ConnectionProvider;
use log::{debug, warn};
use rusqlite::{Connection, Transaction};
use std::borrow::BorrowMut;
use std::time::Instant;

/// Runs `work` inside a transaction on an already open connection.
pub fn run_in_transaction<T, F>(
    conn: &mut Connection,
    operation: &'static str,
    work: F,
) -> RepoResult<T>
where
    F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
{
    let started_at = Instant::now();
    let tx = conn.transaction().map_err(|err| RepoError::Transaction {
        operation,
        source: Box::new(err.into()),
    })?;

    match work(&tx) {
        Ok(value) => {
            tx.commit().map_err(|err| {
                warn!(
                    "event=tx_commit module=repo status=error op={} duration_ms={} error={}",
                    operation,
                    started_at.elapsed().as_millis(),
                    err
                );
                RepoError::Transaction {
                    operation,
                    source: Box::new(err.into()),
                }
            })?;
            debug!(
                "event=tx_commit module=repo status=ok op={} duration_ms={}",
                operation,
                started_at.elapsed().as_millis()
            );
            Ok(value)
        }
        Err(err) => {
            finish_rollback(tx, operation, started_at, &err);
            Err(RepoError::Transaction {
                operation,
                source: Box::new(err),
            })
        }
    }
}

/// Rolls `tx` back and logs the outcome; returns the logged status.
fn finish_rollback(
    tx: Transaction<'_>,
    operation: &'static str,
    started_at: Instant,
    cause: &RepoError,
) -> &'static str {
    match tx.rollback() {
        Ok(()) => {
            warn!(
                "event=tx_rollback module=repo status=ok op={} duration_ms={} error_code={}",
                operation,
                started_at.elapsed().as_millis(),
                cause.code()
            );
            "ok"
        }
        // Dropping the transaction retries the rollback.
        Err(rollback_err) => {
            warn!(
                "event=tx_rollback module=repo status=error op={} duration_ms={} error_code={} error={}",
                operation,
                started_at.elapsed().as_millis(),
                cause.code(),
                rollback_err
            );
            "error"
        }
    }
}

/// Acquires a connection from `provider` and runs `work` in a transaction on it.
pub fn with_unit_of_work<P, T, F>(provider: &P, operation: &'static str, work: F) -> RepoResult<T>
where
    P: ConnectionProvider + ?Sized,
    F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
{
    let mut conn = provider.acquire()?;
    run_in_transaction(BorrowMut::<Connection>::borrow_mut(&mut conn), operation, work)
}
