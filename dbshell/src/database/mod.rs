// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Database handle abstraction and the tabular result model
//!
//! The shell only ever talks to a database through [`Database::execute`].
//! Drivers live behind this trait; the bundled one is SQLite via rusqlite.

#[cfg(feature = "sqlite-backend")]
pub mod sqlite;

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use thiserror::Error;

/// Error raised by a driver while executing a statement
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct DatabaseError {
    message: String,
}

impl DatabaseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
    Blob(Vec<u8>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Real(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Blob(bytes) => write!(f, "<blob {} bytes>", bytes.len()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Real(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Blob(bytes) => {
                let mut seq = serializer.serialize_seq(Some(bytes.len()))?;
                for byte in bytes {
                    seq.serialize_element(byte)?;
                }
                seq.end()
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Real(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Outcome of executing one statement.
///
/// Column names may repeat, so cells are always addressed by position.
/// `rows_affected` only carries meaning when `columns` is empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub rows_affected: u64,
}

impl ResultSet {
    /// Build a row-returning result, checking every row's arity
    pub fn rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, DatabaseError> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(DatabaseError::new(format!(
                "row {} has {} values but the result has {} columns",
                i + 1,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self {
            columns,
            rows,
            rows_affected: 0,
        })
    }

    /// Build the result of a statement that returns no columns
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            rows_affected,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A connection the shell can send statements to
pub trait Database {
    /// Execute one statement and return its full result
    fn execute(&mut self, sql: &str) -> Result<ResultSet, DatabaseError>;
}

impl<D: Database + ?Sized> Database for Box<D> {
    fn execute(&mut self, sql: &str) -> Result<ResultSet, DatabaseError> {
        (**self).execute(sql)
    }
}
