//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Translate "not applied" repository results into not-found errors.
//! - Hold caller-owned selection state without process-wide globals.

pub mod project_service;
pub mod selection;
