use categories_core::db::migrations::latest_version;
use categories_core::{
    open_db, open_db_in_memory, seed_default_categories, CategoryRepository, CategoryToCreate,
    DbError, SqliteCategoryRepository,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(count_rows(&conn), 0);
}

#[test]
fn reopening_file_database_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("categories.sqlite3");

    let first = open_db(&path).unwrap();
    assert_eq!(seed_default_categories(&first).unwrap(), 3);
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    assert_eq!(count_rows(&second), 3);
}

#[test]
fn seeding_twice_inserts_nothing_new() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(seed_default_categories(&conn).unwrap(), 3);
    assert_eq!(seed_default_categories(&conn).unwrap(), 0);
    assert_eq!(count_rows(&conn), 3);
}

#[test]
fn seeding_after_user_rows_still_inserts_every_fixture() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    let rust = repo
        .create_category(&CategoryToCreate::new("Rust").unwrap())
        .unwrap();
    assert_eq!(rust.id, 1);

    assert_eq!(seed_default_categories(&conn).unwrap(), 3);

    let html = repo.get_category("html").unwrap().unwrap();
    assert_eq!(html.title, "HTML");
    assert_ne!(html.id, rust.id);
    assert_eq!(repo.get_category("rust").unwrap().unwrap(), rust);
    assert_eq!(count_rows(&conn), 4);
}

#[test]
fn seeding_after_rename_restores_only_missing_slug() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(seed_default_categories(&conn).unwrap(), 3);
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    repo.update_category("html", &CategoryToCreate::new("HTML5").unwrap())
        .unwrap();

    assert_eq!(seed_default_categories(&conn).unwrap(), 1);
    assert_eq!(repo.get_category("html").unwrap().unwrap().title, "HTML");
    assert_eq!(repo.get_category("html5").unwrap().unwrap().id, 1);
    assert_eq!(count_rows(&conn), 4);
}

#[test]
fn slug_column_is_unique() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO categories (title, slug) VALUES ('First', 'same');",
        [],
    )
    .unwrap();

    let second = conn.execute(
        "INSERT INTO categories (title, slug) VALUES ('Second', 'same');",
        [],
    );
    assert!(second.is_err());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn count_rows(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
        .unwrap()
}
