//! Project use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for callers.
//! - Turn absent rows and unapplied writes into `ProjectNotFound`.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::project::{Project, ProjectId};
use crate::repo::error::RepoError;
use crate::repo::project_repo::ProjectRepository;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for project use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// No project row carries this id.
    ProjectNotFound(ProjectId),
    /// An operation on the current selection ran with nothing selected.
    NoProjectSelected,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project with ID={id} does not exist"),
            Self::NoProjectSelected => write!(f, "no project is selected"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for project CRUD operations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new project and returns it with its assigned id.
    pub fn add_project(&self, project: Project) -> ServiceResult<Project> {
        Ok(self.repo.insert_project(project)?)
    }

    /// Lists all projects ordered by name.
    pub fn fetch_all_projects(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.repo.fetch_all_projects()?)
    }

    /// Loads one project with children, or `ProjectNotFound`.
    pub fn fetch_project_by_id(&self, id: ProjectId) -> ServiceResult<Project> {
        self.repo
            .fetch_project_by_id(id)?
            .ok_or(ServiceError::ProjectNotFound(id))
    }

    /// Rewrites project details, or `ProjectNotFound` when the id matched nothing.
    pub fn modify_project_details(&self, project: &Project) -> ServiceResult<()> {
        let id = project.project_id.ok_or(RepoError::MissingProjectId)?;
        if self.repo.modify_project_details(project)? {
            Ok(())
        } else {
            Err(ServiceError::ProjectNotFound(id))
        }
    }

    /// Deletes a project, or `ProjectNotFound` when the id matched nothing.
    pub fn delete_project(&self, id: ProjectId) -> ServiceResult<()> {
        if self.repo.delete_project(id)? {
            Ok(())
        } else {
            Err(ServiceError::ProjectNotFound(id))
        }
    }
}
