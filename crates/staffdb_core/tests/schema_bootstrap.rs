use rusqlite::Connection;
use staffdb_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_creates_both_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(
        table_columns(&conn, "EMPLOYEE"),
        vec![
            "ID",
            "FIRSTNAME",
            "LASTNAME",
            "MIDDLENAME",
            "POSITION",
            "HIREDATE",
            "SALARY",
            "MANAGER",
            "DEPARTMENT",
        ]
    );
    assert_eq!(
        table_columns(&conn, "DEPARTMENT"),
        vec!["ID", "NAME", "LOCATION"]
    );
}

#[test]
fn reopening_a_populated_file_keeps_its_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staffdb.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO DEPARTMENT (ID, NAME, LOCATION) VALUES (1, 'Eng', NULL);",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    let rows: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM DEPARTMENT;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn existing_tables_from_another_tool_are_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE DEPARTMENT (ID INTEGER PRIMARY KEY, NAME TEXT, LOCATION TEXT, BUDGET REAL);
         INSERT INTO DEPARTMENT (ID, NAME, LOCATION, BUDGET) VALUES (4, 'Ops', 'Lviv', 10.5);",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(
        table_columns(&conn, "DEPARTMENT"),
        vec!["ID", "NAME", "LOCATION", "BUDGET"]
    );
    assert_eq!(table_columns(&conn, "EMPLOYEE").len(), 9);
}

#[test]
fn missing_parent_directory_is_reported_as_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("staffdb.sqlite3");

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::Unavailable { target, .. } => assert!(target.ends_with("staffdb.sqlite3")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bootstrap_failure_keeps_the_sqlite_cause() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE VIEW EMPLOYEE AS SELECT 1 AS ID;")
        .unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Bootstrap(_)));
    assert!(std::error::Error::source(&err).is_some());
}

fn table_columns(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});")).unwrap();
    let mut rows = stmt.query([]).unwrap();
    let mut columns = Vec::new();
    while let Some(row) = rows.next().unwrap() {
        columns.push(row.get::<_, String>(1).unwrap());
    }
    columns
}
