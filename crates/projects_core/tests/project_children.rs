use projects_core::db::open_db;
use projects_core::{
    Category, DbConfig, Decimal, FileConnectionProvider, Project, ProjectRepository, RepoError,
    SqliteProjectRepository,
};
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    path: PathBuf,
    repo: SqliteProjectRepository<FileConnectionProvider>,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.db");
    let repo = SqliteProjectRepository::new(FileConnectionProvider::new(DbConfig::new(&path)));
    Fixture {
        _dir: dir,
        path,
        repo,
    }
}

fn seed_children(conn: &Connection, project_id: i64) {
    conn.execute(
        "INSERT INTO material (project_id, material_name, num_required, cost)
         VALUES (?1, '2x4 lumber', 8, '3.49'), (?1, 'deck screws', NULL, NULL);",
        [project_id],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO step (project_id, step_text, step_order)
         VALUES (?1, 'cut boards', 2), (?1, 'measure twice', 1);",
        [project_id],
    )
    .unwrap();
    conn.execute_batch(
        "INSERT INTO category (category_name) VALUES ('Outdoor'), ('Carpentry'), ('Unused');",
    )
    .unwrap();
    conn.execute(
        "INSERT INTO project_category (project_id, category_id)
         SELECT ?1, category_id FROM category WHERE category_name IN ('Outdoor', 'Carpentry');",
        [project_id],
    )
    .unwrap();
}

#[test]
fn fetch_by_id_assembles_children_in_store_order() {
    let fx = fixture();
    let id = fx
        .repo
        .insert_project(Project::new("Deck"))
        .unwrap()
        .project_id
        .unwrap();
    seed_children(&open_db(&fx.path).unwrap(), id);

    let loaded = fx.repo.fetch_project_by_id(id).unwrap().unwrap();

    assert_eq!(loaded.materials.len(), 2);
    assert_eq!(loaded.materials[0].material_name, "2x4 lumber");
    assert_eq!(loaded.materials[0].num_required, Some(8));
    assert_eq!(loaded.materials[0].cost, Some(Decimal::from_hundredths(349)));
    assert_eq!(loaded.materials[1].num_required, None);
    assert_eq!(loaded.materials[1].cost, None);
    assert!(loaded.materials.iter().all(|m| m.project_id == id));

    let step_texts: Vec<_> = loaded.steps.iter().map(|s| s.step_text.as_str()).collect();
    assert_eq!(step_texts, vec!["cut boards", "measure twice"]);
    assert_eq!(loaded.steps[1].step_order, 1);

    let mut category_names: Vec<_> = loaded
        .categories
        .iter()
        .map(|c: &Category| c.category_name.as_str())
        .collect();
    category_names.sort_unstable();
    assert_eq!(category_names, vec!["Carpentry", "Outdoor"]);
}

#[test]
fn children_of_other_projects_are_not_attached() {
    let fx = fixture();
    let deck = fx.repo.insert_project(Project::new("Deck")).unwrap();
    let shed = fx.repo.insert_project(Project::new("Shed")).unwrap();
    seed_children(&open_db(&fx.path).unwrap(), deck.project_id.unwrap());

    let loaded = fx
        .repo
        .fetch_project_by_id(shed.project_id.unwrap())
        .unwrap()
        .unwrap();
    assert!(loaded.materials.is_empty());
    assert!(loaded.steps.is_empty());
    assert!(loaded.categories.is_empty());
}

#[test]
fn failing_material_query_fails_the_whole_fetch() {
    let fx = fixture();
    let id = fx
        .repo
        .insert_project(Project::new("Deck"))
        .unwrap()
        .project_id
        .unwrap();
    open_db(&fx.path)
        .unwrap()
        .execute_batch("DROP TABLE material;")
        .unwrap();

    let err = fx.repo.fetch_project_by_id(id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Transaction {
            operation: "project_get",
            ..
        }
    ));
    assert!(matches!(err.root_cause(), RepoError::Statement(_)));
}

#[test]
fn malformed_child_column_is_an_extract_error() {
    let fx = fixture();
    let id = fx
        .repo
        .insert_project(Project::new("Deck"))
        .unwrap()
        .project_id
        .unwrap();
    let conn = open_db(&fx.path).unwrap();
    conn.execute(
        "INSERT INTO material (project_id, material_name, cost) VALUES (?1, 'glue', 'a lot');",
        [id],
    )
    .unwrap();

    let err = fx.repo.fetch_project_by_id(id).unwrap_err();
    match err.root_cause() {
        RepoError::Extract(extract) => assert_eq!(extract.column, "cost"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn delete_removes_dependent_rows_with_the_project() {
    let fx = fixture();
    let id = fx
        .repo
        .insert_project(Project::new("Deck"))
        .unwrap()
        .project_id
        .unwrap();
    let conn = open_db(&fx.path).unwrap();
    seed_children(&conn, id);

    assert!(fx.repo.delete_project(id).unwrap());

    for table in ["material", "step", "project_category"] {
        let remaining: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {table} WHERE project_id = ?1;"),
                params![id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(remaining, 0, "{table} rows survived delete");
    }
    let categories: i64 = conn
        .query_row("SELECT COUNT(*) FROM category;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(categories, 3);
}
