use projects_core::db::open_db;
use projects_core::{
    DbConfig, Decimal, FileConnectionProvider, Project, ProjectSelection, ProjectService,
    ProjectValidationError, RepoError, ServiceError, SqliteProjectRepository,
};
use tempfile::TempDir;

type Service = ProjectService<SqliteProjectRepository<FileConnectionProvider>>;

fn service_in(dir: &TempDir) -> Service {
    let config = DbConfig::new(dir.path().join("projects.db"));
    ProjectService::new(SqliteProjectRepository::new(FileConnectionProvider::new(
        config,
    )))
}

#[test]
fn service_wraps_repository_calls() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let created = service.add_project(Project::new("Workbench")).unwrap();
    let id = created.project_id.unwrap();

    let fetched = service.fetch_project_by_id(id).unwrap();
    assert_eq!(fetched.project_name, "Workbench");

    let ids: Vec<_> = service
        .fetch_all_projects()
        .unwrap()
        .into_iter()
        .filter_map(|item| item.project_id)
        .collect();
    assert_eq!(ids, vec![id]);
}

#[test]
fn missing_project_becomes_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let err = service.fetch_project_by_id(7).unwrap_err();
    assert!(matches!(err, ServiceError::ProjectNotFound(7)));
    assert_eq!(err.to_string(), "project with ID=7 does not exist");
}

#[test]
fn unapplied_modify_and_delete_become_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let mut ghost = Project::new("Ghost");
    ghost.project_id = Some(11);

    assert!(matches!(
        service.modify_project_details(&ghost),
        Err(ServiceError::ProjectNotFound(11))
    ));
    assert!(matches!(
        service.delete_project(11),
        Err(ServiceError::ProjectNotFound(11))
    ));
}

#[test]
fn repository_failures_pass_through_with_cause() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let err = service.add_project(Project::new("")).unwrap_err();
    match err {
        ServiceError::Repo(RepoError::Validation(ProjectValidationError::EmptyName)) => {}
        other => panic!("unexpected error: {other}"),
    }

    let err = service
        .modify_project_details(&Project::new("Transient"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::MissingProjectId)
    ));
}

#[test]
fn selection_loads_and_refreshes_current_project() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let id = service
        .add_project(Project::new("Planter"))
        .unwrap()
        .project_id
        .unwrap();

    let mut selection = ProjectSelection::new();
    assert!(selection.current().is_none());

    let selected = selection.select(&service, id).unwrap();
    assert_eq!(selected.project_name, "Planter");
    assert_eq!(selection.current_id(), Some(id));

    let updated = selection
        .modify_current(&service, |project| {
            project.project_name = "Raised planter".to_string();
            project.estimated_hours = Some(Decimal::from_hundredths(650));
            project.project_id = Some(9_999);
        })
        .unwrap();
    assert_eq!(updated.project_name, "Raised planter");
    assert_eq!(updated.project_id, Some(id));

    let stored = service.fetch_project_by_id(id).unwrap();
    assert_eq!(stored.estimated_hours, Some(Decimal::from_hundredths(650)));
    assert!(service.fetch_project_by_id(9_999).is_err());
}

#[test]
fn failed_select_leaves_nothing_selected() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let id = service
        .add_project(Project::new("Chair"))
        .unwrap()
        .project_id
        .unwrap();

    let mut selection = ProjectSelection::new();
    selection.select(&service, id).unwrap();

    assert!(matches!(
        selection.select(&service, id + 100),
        Err(ServiceError::ProjectNotFound(_))
    ));
    assert!(selection.current().is_none());
}

#[test]
fn modify_without_selection_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let mut selection = ProjectSelection::new();
    let err = selection.modify_current(&service, |_| {}).unwrap_err();
    assert!(matches!(err, ServiceError::NoProjectSelected));
}

#[test]
fn invalid_edit_keeps_previous_selection() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let id = service
        .add_project(Project::new("Lamp"))
        .unwrap()
        .project_id
        .unwrap();

    let mut selection = ProjectSelection::new();
    selection.select(&service, id).unwrap();

    let err = selection
        .modify_current(&service, |project| project.difficulty = Some(0))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));
    assert_eq!(
        selection.current().map(|p| p.project_name.as_str()),
        Some("Lamp")
    );
}

#[test]
fn failed_refresh_after_write_keeps_selection() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let id = service
        .add_project(Project::new("Shelf"))
        .unwrap()
        .project_id
        .unwrap();

    let mut selection = ProjectSelection::new();
    selection.select(&service, id).unwrap();
    open_db(dir.path().join("projects.db"))
        .unwrap()
        .execute_batch("DROP TABLE step;")
        .unwrap();

    let err = selection
        .modify_current(&service, |project| {
            project.project_name = "Wall shelf".to_string();
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));
    assert_eq!(selection.current_id(), Some(id));
    assert_eq!(
        selection.current().map(|p| p.project_name.as_str()),
        Some("Shelf")
    );

    let names: Vec<_> = service
        .fetch_all_projects()
        .unwrap()
        .into_iter()
        .map(|project| project.project_name)
        .collect();
    assert_eq!(names, vec!["Wall shelf"]);
}

#[test]
fn deleting_selected_project_clears_selection() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let keep = service
        .add_project(Project::new("Keep"))
        .unwrap()
        .project_id
        .unwrap();
    let drop_id = service
        .add_project(Project::new("Drop"))
        .unwrap()
        .project_id
        .unwrap();

    let mut selection = ProjectSelection::new();
    selection.select(&service, keep).unwrap();
    selection.delete(&service, drop_id).unwrap();
    assert_eq!(selection.current_id(), Some(keep));

    selection.delete(&service, keep).unwrap();
    assert!(selection.current().is_none());
    assert!(service.fetch_all_projects().unwrap().is_empty());
}

#[test]
fn stale_selection_is_cleared_when_row_disappears() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let id = service
        .add_project(Project::new("Vanishing"))
        .unwrap()
        .project_id
        .unwrap();

    let mut selection = ProjectSelection::new();
    selection.select(&service, id).unwrap();
    service.delete_project(id).unwrap();

    let err = selection
        .modify_current(&service, |project| project.notes = Some("late".to_string()))
        .unwrap_err();
    assert!(matches!(err, ServiceError::ProjectNotFound(missing) if missing == id));
    assert!(selection.current().is_none());
}
