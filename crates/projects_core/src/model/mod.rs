//! Domain model for projects and their dependent records.
//!
//! # Responsibility
//! - Define the project root entity and its read-only children.
//! - Provide the exact scale-2 decimal used for hours and cost.
//!
//! # Invariants
//! - A project id is assigned by storage and never changes afterwards.
//! - Child collections are only populated by a by-id fetch.

pub mod category;
pub mod decimal;
pub mod material;
pub mod project;
pub mod step;
