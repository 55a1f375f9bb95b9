//! Transactional data access for DIY projects.
//!
//! Projects live in SQLite together with their materials, steps and
//! categories. Every repository call opens its own connection, runs inside
//! one transaction and maps rows back into typed entities.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{ConnectionProvider, DbConfig, DbError, DbResult, FileConnectionProvider};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::Category;
pub use model::decimal::{Decimal, DecimalParseError};
pub use model::material::Material;
pub use model::project::{Project, ProjectId, ProjectValidationError};
pub use model::step::Step;
pub use repo::error::{RepoError, RepoResult};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use service::project_service::{ProjectService, ServiceError, ServiceResult};
pub use service::selection::ProjectSelection;
