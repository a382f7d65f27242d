//! The execution collaborator the builders hand their statements to.

use crate::error::OrmResult;
use crate::row::Row;
use crate::value::Value;

/// Outcome of a write statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub rows_affected: i64,
    pub last_insert_id: i64,
}

impl ExecResult {
    pub fn new(rows_affected: i64, last_insert_id: i64) -> Self {
        Self {
            rows_affected,
            last_insert_id,
        }
    }
}

/// A database connection (or anything standing in for one).
///
/// `args` are positional: the n-th argument binds the n-th `?` in `sql`.
/// Implementations own all I/O, locking and pooling; errors they return are
/// propagated to the caller unchanged (wrap driver errors with
/// [`OrmError::execution`](crate::OrmError::execution)).
pub trait Executor {
    /// Execute a write statement.
    fn execute(&self, sql: &str, args: &[Value]) -> OrmResult<ExecResult>;

    /// Execute a read statement and return every row in result order.
    fn query(&self, sql: &str, args: &[Value]) -> OrmResult<Vec<Row>>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, sql: &str, args: &[Value]) -> OrmResult<ExecResult> {
        (**self).execute(sql, args)
    }

    fn query(&self, sql: &str, args: &[Value]) -> OrmResult<Vec<Row>> {
        (**self).query(sql, args)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn execute(&self, sql: &str, args: &[Value]) -> OrmResult<ExecResult> {
        (**self).execute(sql, args)
    }

    fn query(&self, sql: &str, args: &[Value]) -> OrmResult<Vec<Row>> {
        (**self).query(sql, args)
    }
}
