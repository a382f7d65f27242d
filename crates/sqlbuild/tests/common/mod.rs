#![allow(dead_code)]

use std::sync::Mutex;

use sqlbuild::{ExecResult, Executor, OrmError, OrmResult, Row, Value};

/// One statement seen by [`MockExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub sql: String,
    pub args: Vec<Value>,
}

/// Records every statement and answers with canned results.
#[derive(Debug, Default)]
pub struct MockExecutor {
    calls: Mutex<Vec<Call>>,
    rows: Vec<Row>,
    result: ExecResult,
    fail: bool,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_result(mut self, rows_affected: i64, last_insert_id: i64) -> Self {
        self.result = ExecResult::new(rows_affected, last_insert_id);
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Call {
        self.calls().pop().expect("no statement was executed")
    }

    fn record(&self, sql: &str, args: &[Value]) -> OrmResult<()> {
        self.calls.lock().unwrap().push(Call {
            sql: sql.to_string(),
            args: args.to_vec(),
        });
        if self.fail {
            return Err(OrmError::execution("mock driver offline"));
        }
        Ok(())
    }
}

impl Executor for MockExecutor {
    fn execute(&self, sql: &str, args: &[Value]) -> OrmResult<ExecResult> {
        self.record(sql, args)?;
        Ok(self.result)
    }

    fn query(&self, sql: &str, args: &[Value]) -> OrmResult<Vec<Row>> {
        self.record(sql, args)?;
        Ok(self.rows.clone())
    }
}
