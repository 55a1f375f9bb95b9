//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/list/get/update/delete over the `project` table.
//! - Assemble materials, steps and categories for by-id reads.
//!
//! # Invariants
//! - Every operation acquires its own connection and runs in one transaction.
//! - Write paths call `Project::validate()` before any SQL runs.
//! - Update/delete matching zero rows return `false`, never an error.
//! - A keyed write touching more than one row is rolled back as `Integrity`.

use super::error::{RepoError, RepoResult};
use super::rows::{
    category_from_row, material_from_row, project_from_row, step_from_row, PROJECT_COLUMNS,
};
use super::transaction::with_unit_of_work;
use crate::db::bind::{bind_params, SqlParam};
use crate::db::extract::ExtractResult;
use crate::db::ConnectionProvider;
use crate::model::project::{Project, ProjectId};
use log::{error, info};
use rusqlite::{Row, Transaction};
use std::time::Instant;

/// Repository interface for project persistence.
pub trait ProjectRepository {
    /// Inserts a transient project and returns it with the assigned id.
    fn insert_project(&self, project: Project) -> RepoResult<Project>;
    /// Lists every project by name, without children.
    fn fetch_all_projects(&self) -> RepoResult<Vec<Project>>;
    /// Loads one project with its materials, steps and categories.
    fn fetch_project_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Rewrites all writable attributes; `false` when no row has the id.
    fn modify_project_details(&self, project: &Project) -> RepoResult<bool>;
    /// Deletes one project and its dependents; `false` when no row has the id.
    fn delete_project(&self, id: ProjectId) -> RepoResult<bool>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteProjectRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn run<T>(
        &self,
        operation: &'static str,
        work: impl FnOnce(&Transaction<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let result = with_unit_of_work(&self.provider, operation, work);
        match &result {
            Ok(_) => info!(
                "event={} module=repo status=ok duration_ms={}",
                operation,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event={} module=repo status=error duration_ms={} error_code={} error={}",
                operation,
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }
        result
    }
}

impl<P: ConnectionProvider> ProjectRepository for SqliteProjectRepository<P> {
    fn insert_project(&self, mut project: Project) -> RepoResult<Project> {
        project.validate()?;
        if let Some(id) = project.project_id {
            return Err(RepoError::AlreadyPersisted(id));
        }

        let project_id = self.run("project_insert", |tx| {
            execute(
                tx,
                "INSERT INTO project (
                    project_name,
                    estimated_hours,
                    actual_hours,
                    difficulty,
                    notes
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                &detail_params(&project),
            )?;
            last_insert_id(tx)
        })?;

        project.project_id = Some(project_id);
        Ok(project)
    }

    fn fetch_all_projects(&self) -> RepoResult<Vec<Project>> {
        self.run("project_list", |tx| {
            query_all(
                tx,
                &format!("SELECT {PROJECT_COLUMNS} FROM project ORDER BY project_name ASC;"),
                &[],
                project_from_row,
            )
        })
    }

    fn fetch_project_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.run("project_get", |tx| {
            let by_id = [SqlParam::Integer(Some(id))];
            let mut found = query_all(
                tx,
                &format!("SELECT {PROJECT_COLUMNS} FROM project WHERE project_id = ?1;"),
                &by_id,
                project_from_row,
            )?;

            let Some(mut project) = found.pop() else {
                return Ok(None);
            };

            project.materials = query_all(
                tx,
                "SELECT material_id, project_id, material_name, num_required, cost
                 FROM material
                 WHERE project_id = ?1;",
                &by_id,
                material_from_row,
            )?;
            project.steps = query_all(
                tx,
                "SELECT step_id, project_id, step_text, step_order
                 FROM step
                 WHERE project_id = ?1;",
                &by_id,
                step_from_row,
            )?;
            project.categories = query_all(
                tx,
                "SELECT c.category_id, c.category_name
                 FROM category c
                 INNER JOIN project_category pc USING (category_id)
                 WHERE pc.project_id = ?1;",
                &by_id,
                category_from_row,
            )?;

            Ok(Some(project))
        })
    }

    fn modify_project_details(&self, project: &Project) -> RepoResult<bool> {
        project.validate()?;
        let id = project.project_id.ok_or(RepoError::MissingProjectId)?;

        self.run("project_update", |tx| {
            let [name, estimated, actual, difficulty, notes] = detail_params(project);
            let changed = execute(
                tx,
                "UPDATE project
                 SET
                    project_name = ?1,
                    estimated_hours = ?2,
                    actual_hours = ?3,
                    difficulty = ?4,
                    notes = ?5
                 WHERE project_id = ?6;",
                &[
                    name,
                    estimated,
                    actual,
                    difficulty,
                    notes,
                    SqlParam::Integer(Some(id)),
                ],
            )?;
            single_row_applied("project_update", changed)
        })
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<bool> {
        self.run("project_delete", |tx| {
            let changed = execute(
                tx,
                "DELETE FROM project WHERE project_id = ?1;",
                &[SqlParam::Integer(Some(id))],
            )?;
            single_row_applied("project_delete", changed)
        })
    }
}

fn detail_params(project: &Project) -> [SqlParam<'_>; 5] {
    [
        SqlParam::Text(Some(project.project_name.as_str())),
        SqlParam::Decimal(project.estimated_hours),
        SqlParam::Decimal(project.actual_hours),
        SqlParam::Integer(project.difficulty.map(i64::from)),
        SqlParam::Text(project.notes.as_deref()),
    ]
}

fn execute(tx: &Transaction<'_>, sql: &str, params: &[SqlParam<'_>]) -> RepoResult<usize> {
    let mut stmt = tx.prepare(sql)?;
    bind_params(&mut stmt, params)?;
    Ok(stmt.raw_execute()?)
}

fn query_all<T>(
    tx: &Transaction<'_>,
    sql: &str,
    params: &[SqlParam<'_>],
    map: fn(&Row<'_>) -> ExtractResult<T>,
) -> RepoResult<Vec<T>> {
    let mut stmt = tx.prepare(sql)?;
    bind_params(&mut stmt, params)?;

    let mut rows = stmt.raw_query();
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(map(row)?);
    }
    Ok(items)
}

fn last_insert_id(tx: &Transaction<'_>) -> RepoResult<ProjectId> {
    let id = tx.query_row("SELECT last_insert_rowid();", [], |row| row.get(0))?;
    Ok(id)
}

fn single_row_applied(operation: &'static str, affected: usize) -> RepoResult<bool> {
    match affected {
        0 => Ok(false),
        1 => Ok(true),
        affected => Err(RepoError::Integrity {
            operation,
            affected,
        }),
    }
}
