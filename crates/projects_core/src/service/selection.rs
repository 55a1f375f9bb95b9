//! Caller-held "current project" state.
//!
//! # Responsibility
//! - Keep the project a caller is working on between service calls.
//! - Refresh or drop that copy when the underlying row changes.
//!
//! # Invariants
//! - A selection always holds a project loaded by id (children included).
//! - Deleting the selected project clears the selection.
//! - A failed select leaves nothing selected.

use super::project_service::{ProjectService, ServiceError, ServiceResult};
use crate::model::project::{Project, ProjectId};
use crate::repo::project_repo::ProjectRepository;

/// The project a caller has chosen to work on, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSelection {
    current: Option<Project>,
}

impl ProjectSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    pub fn current_id(&self) -> Option<ProjectId> {
        self.current.as_ref().and_then(|project| project.project_id)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Loads `id` with its children and makes it the current project.
    pub fn select<R: ProjectRepository>(
        &mut self,
        service: &ProjectService<R>,
        id: ProjectId,
    ) -> ServiceResult<&Project> {
        self.current = None;
        let project = service.fetch_project_by_id(id)?;
        Ok(&*self.current.insert(project))
    }

    /// Applies `edit` to a copy of the current project, persists it and
    /// re-reads the stored row.
    ///
    /// Validation and store failures, including a failed re-read after a
    /// successful write, leave the selection untouched; `ProjectNotFound`
    /// clears it.
    pub fn modify_current<R, F>(
        &mut self,
        service: &ProjectService<R>,
        edit: F,
    ) -> ServiceResult<&Project>
    where
        R: ProjectRepository,
        F: FnOnce(&mut Project),
    {
        let mut edited = self
            .current
            .clone()
            .ok_or(ServiceError::NoProjectSelected)?;
        let id = edited.project_id.ok_or(ServiceError::NoProjectSelected)?;
        edit(&mut edited);
        edited.project_id = Some(id);

        let refreshed = service
            .modify_project_details(&edited)
            .and_then(|()| service.fetch_project_by_id(id));
        match refreshed {
            Ok(project) => Ok(&*self.current.insert(project)),
            Err(err) => {
                if matches!(err, ServiceError::ProjectNotFound(_)) {
                    self.current = None;
                }
                Err(err)
            }
        }
    }

    /// Deletes `id` and drops the selection if it held that project.
    ///
    /// Store failures leave the selection in place.
    pub fn delete<R: ProjectRepository>(
        &mut self,
        service: &ProjectService<R>,
        id: ProjectId,
    ) -> ServiceResult<()> {
        let result = service.delete_project(id);
        let row_gone = matches!(result, Ok(()) | Err(ServiceError::ProjectNotFound(_)));
        if row_gone && self.current_id() == Some(id) {
            self.current = None;
        }
        result
    }
}
