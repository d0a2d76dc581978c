use cofre_core::db::migrations::latest_version;
use cofre_core::db::{
    open_db, open_db_in_memory, open_db_with_timeout, DbError, MAX_BUSY_TIMEOUT_MS,
};
use cofre_core::{CategoryService, CoreConfig, SqliteCategoryDao, TransactedConnection};
use rusqlite::Connection;
use std::time::Duration;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "category");
    assert_table_exists(&conn, "secret");
    assert_table_exists(&conn, "secret_category");
    assert!(conn.is_autocommit());
}

#[test]
fn open_db_enables_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cofre.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "category");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

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

#[test]
fn failed_schema_step_leaves_database_at_previous_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE VIEW secret_category AS SELECT 1 AS pk_secret, 1 AS pk_category;")
        .unwrap();
    drop(conn);

    assert!(matches!(open_db(&path), Err(DbError::Sqlite(_))));

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 0);
    assert_eq!(table_count(&conn, "category"), 0);
}

#[test]
fn busy_timeout_beyond_engine_limit_is_rejected_before_opening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slow.db");

    let too_long = Duration::from_millis(u64::from(MAX_BUSY_TIMEOUT_MS) + 1);
    match open_db_with_timeout(&path, too_long).unwrap_err() {
        DbError::BusyTimeoutOutOfRange { requested_ms } => {
            assert_eq!(requested_ms, u128::from(MAX_BUSY_TIMEOUT_MS) + 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!path.exists());

    let longest = Duration::from_millis(u64::from(MAX_BUSY_TIMEOUT_MS));
    let conn = open_db_with_timeout(&path, longest).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn committed_categories_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cofre.db");

    {
        let conn = TransactedConnection::open(&path).unwrap();
        let scope = conn.begin().unwrap();
        let service = CategoryService::new(SqliteCategoryDao::new(&conn));
        service.create("API").unwrap();
        scope.commit().unwrap();
        service.create("Rascunho").unwrap();
    }

    let config = CoreConfig {
        db_path: Some(path),
        ..CoreConfig::default()
    };
    let conn = config.open_connection().unwrap();
    let _scope = conn.begin().unwrap();
    let service = CategoryService::new(SqliteCategoryDao::new(&conn));
    assert!(service.find_by_name("API").unwrap().is_some());
    assert!(service.find_by_name("Rascunho").unwrap().is_none());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_count(conn: &Connection, table_name: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
        [table_name],
        |row| row.get(0),
    )
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    assert_eq!(
        table_count(conn, table_name),
        1,
        "table {table_name} does not exist"
    );
}
