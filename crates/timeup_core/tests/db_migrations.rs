use timeup_core::db::migrations::latest_version;
use timeup_core::db::{open_db, open_db_in_memory, DbError};
use timeup_core::{KeyValueStore, SqliteKeyValueStore, StoreError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn reopening_file_database_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timeup.db");

    let conn_first = open_db(&path).unwrap();
    let mut store = SqliteKeyValueStore::try_new(&conn_first).unwrap();
    store.set("timeup.tasks", b"[]").unwrap();
    drop(store);
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let store = SqliteKeyValueStore::try_new(&conn_second).unwrap();
    assert_eq!(store.get("timeup.tasks").unwrap().as_deref(), Some(&b"[]"[..]));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteKeyValueStore::try_new(&conn).err().unwrap();
    let message = err.to_string();
    assert!(matches!(
        err,
        StoreError::Db(DbError::SchemaOutdated { found: 0, expected }) if expected == latest_version()
    ));
    assert!(message.contains("is behind"), "{message}");
    assert!(!message.contains("newer"), "{message}");
}

#[test]
fn store_rejects_connection_from_newer_build() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();

    let err = SqliteKeyValueStore::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        StoreError::Db(DbError::SchemaTooNew { found: 999, .. })
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
