//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//! - Own transaction demarcation for every data-access call.
//!
//! # Invariants
//! - Repository writes must enforce `Project::validate()` before persistence.
//! - Zero-row updates/deletes are reported as `false`; the service layer
//!   decides whether that is a not-found error.

pub mod error;
pub mod project_repo;
mod rows;
pub mod transaction;
