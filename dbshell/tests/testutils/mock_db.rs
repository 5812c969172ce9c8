//! Scripted database for exercising the shell without a real driver

use dbshell::{Database, DatabaseError, ResultSet, Value};

enum Response {
    Result(ResultSet),
    Failure(String),
}

/// Records executed statements. Responses are matched by substring in the
/// order they were registered; unmatched statements return `Rows affected: 0`.
#[derive(Default)]
pub struct MockDatabase {
    pub executed: Vec<String>,
    responses: Vec<(String, Response)>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer statements containing `pattern` with `result`
    pub fn respond(mut self, pattern: &str, result: ResultSet) -> Self {
        self.responses
            .push((pattern.to_string(), Response::Result(result)));
        self
    }

    /// Fail statements containing `pattern` with `message`
    pub fn fail_on(mut self, pattern: &str, message: &str) -> Self {
        self.responses
            .push((pattern.to_string(), Response::Failure(message.to_string())));
        self
    }

    pub fn executed_count(&self) -> usize {
        self.executed.len()
    }
}

impl Database for MockDatabase {
    fn execute(&mut self, sql: &str) -> Result<ResultSet, DatabaseError> {
        self.executed.push(sql.to_string());
        match self.responses.iter().find(|(p, _)| sql.contains(p.as_str())) {
            Some((_, Response::Result(result))) => Ok(result.clone()),
            Some((_, Response::Failure(message))) => Err(DatabaseError::new(message.clone())),
            None => Ok(ResultSet::affected(0)),
        }
    }
}

/// `id, password` result with a single row
pub fn users_result() -> ResultSet {
    ResultSet::rows(
        vec!["id".into(), "password".into()],
        vec![vec![Value::Integer(1), Value::Text("hunter2".into())]],
    )
    .unwrap()
}

/// Single-cell result
pub fn scalar(column: &str, value: Value) -> ResultSet {
    ResultSet::rows(vec![column.to_string()], vec![vec![value]]).unwrap()
}
