// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! SQLite driver backed by rusqlite

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::Connection;

use super::{Database, DatabaseError, ResultSet, Value};
use crate::splitter::split;

/// A local SQLite database file (or `:memory:`)
pub struct SqliteDatabase {
    conn: Connection,
}

impl SqliteDatabase {
    /// Open a database file, creating it when missing. `:memory:` opens a
    /// private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let conn = if path.as_os_str() == ":memory:" {
            Connection::open_in_memory()
        } else {
            Connection::open(path)
        }
        .map_err(|e| DatabaseError::new(format!("failed to open {}: {}", path.display(), e)))?;
        log::debug!("Opened SQLite database at {}", path.display());
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::open(":memory:")
    }

    fn execute_one(&self, sql: &str) -> Result<ResultSet, DatabaseError> {
        let mut stmt = self.conn.prepare(sql)?;

        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        if columns.is_empty() {
            let changes = stmt.execute([])?;
            // sqlite3_changes() keeps the last DML count across DDL and
            // transaction control.
            let affected = if modifies_rows(sql) { changes as u64 } else { 0 };
            return Ok(ResultSet::affected(affected));
        }

        let mut rows = Vec::new();
        let mut raw_rows = stmt.query([])?;
        while let Some(row) = raw_rows.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                values.push(convert(row.get_ref(i)?));
            }
            rows.push(values);
        }

        ResultSet::rows(columns, rows)
    }
}

impl Database for SqliteDatabase {
    /// Statements are run one at a time; the last statement's result wins.
    fn execute(&mut self, sql: &str) -> Result<ResultSet, DatabaseError> {
        let mut last = ResultSet::affected(0);
        for statement in split(sql) {
            log::debug!("sqlite execute: {}", statement);
            last = self.execute_one(&statement)?;
        }
        Ok(last)
    }
}

/// Whether a column-less statement is INSERT, UPDATE, DELETE or REPLACE
/// (possibly behind a `WITH` clause)
fn modifies_rows(sql: &str) -> bool {
    let keyword = sql
        .split(|c: char| c.is_whitespace() || c == '(')
        .find(|word| !word.is_empty())
        .unwrap_or_default();
    ["INSERT", "UPDATE", "DELETE", "REPLACE", "WITH"]
        .iter()
        .any(|k| keyword.eq_ignore_ascii_case(k))
}

fn convert(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Integer(n),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(s) => Value::Text(String::from_utf8_lossy(s).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(error: rusqlite::Error) -> Self {
        DatabaseError::new(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> SqliteDatabase {
        SqliteDatabase::open_in_memory().unwrap()
    }

    #[test]
    fn test_ddl_and_dml_report_rows_affected() {
        let mut db = db();
        let created = db.execute("CREATE TABLE t (id INTEGER, name TEXT);").unwrap();
        assert!(created.columns.is_empty());
        assert_eq!(created.rows_affected, 0);

        let inserted = db
            .execute("INSERT INTO t VALUES (1, 'a'), (2, 'b');")
            .unwrap();
        assert_eq!(inserted.rows_affected, 2);
    }

    #[test]
    fn test_ddl_after_dml_reports_no_rows_affected() {
        let mut db = db();
        db.execute("CREATE TABLE t (x);").unwrap();
        let inserted = db.execute("INSERT INTO t VALUES (1), (2), (3);").unwrap();
        assert_eq!(inserted.rows_affected, 3);

        for sql in ["CREATE TABLE u (y);", "BEGIN;", "COMMIT;", "DROP TABLE u;"] {
            let result = db.execute(sql).unwrap();
            assert_eq!(result.rows_affected, 0, "{}", sql);
        }

        let deleted = db.execute("DELETE FROM t WHERE x > 1;").unwrap();
        assert_eq!(deleted.rows_affected, 2);
    }

    #[test]
    fn test_modifies_rows() {
        assert!(modifies_rows("insert into t values (1)"));
        assert!(modifies_rows("  UPDATE t SET x = 1"));
        assert!(modifies_rows("WITH c AS (SELECT 1) DELETE FROM t"));
        assert!(!modifies_rows("CREATE TABLE t (x)"));
        assert!(!modifies_rows("DROP TABLE t"));
        assert!(!modifies_rows(""));
    }

    #[test]
    fn test_query_maps_value_types() {
        let mut db = db();
        let result = db
            .execute("SELECT 1 AS i, 2.5 AS r, 'x' AS s, NULL AS n, X'0102' AS b")
            .unwrap();
        assert_eq!(result.columns, vec!["i", "r", "s", "n", "b"]);
        assert_eq!(
            result.rows,
            vec![vec![
                Value::Integer(1),
                Value::Real(2.5),
                Value::Text("x".into()),
                Value::Null,
                Value::Blob(vec![1, 2]),
            ]]
        );
    }

    #[test]
    fn test_duplicate_column_names_kept_positionally() {
        let mut db = db();
        let result = db.execute("SELECT 1 AS a, 2 AS a").unwrap();
        assert_eq!(result.columns, vec!["a", "a"]);
        assert_eq!(result.rows[0], vec![Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn test_multiple_statements_return_last_result() {
        let mut db = db();
        let result = db
            .execute("CREATE TABLE t (x); INSERT INTO t VALUES (5); SELECT x FROM t;")
            .unwrap();
        assert_eq!(result.rows, vec![vec![Value::Integer(5)]]);
    }

    #[test]
    fn test_error_carries_driver_message() {
        let mut db = db();
        let err = db.execute("SELECT * FROM missing_table").unwrap_err();
        assert!(err.message().contains("no such table"));
    }
}
