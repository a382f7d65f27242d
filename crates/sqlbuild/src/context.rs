//! Connection context: wraps an [`Executor`] with statement logging and
//! bookkeeping of the last write, and hands out fresh builders.
//!
//! # Example
//!
//! ```rust,ignore
//! use sqlbuild::{args, Context, ContextConfig};
//!
//! let ctx = Context::new(driver).with_config(ContextConfig::new().debug(true));
//!
//! let id = ctx.create_command()
//!     .table("users")
//!     .insert(&new_user)
//!     .execute(&ctx)?;
//!
//! let total = ctx.create_query().from("users").count(&ctx);
//! ```

use std::cell::Cell;

use tracing::Level;

use crate::config::ContextConfig;
use crate::error::OrmResult;
use crate::executor::{ExecResult, Executor};
use crate::qb::{MutationQb, SelectQb};
use crate::row::Row;
use crate::value::Value;

/// Owns one executor for a single caller.
///
/// The last-write counters use `Cell`, so a `Context` is deliberately `!Sync`:
/// share it across threads only behind external synchronization.
#[derive(Debug)]
pub struct Context<E> {
    executor: E,
    config: ContextConfig,
    last_insert_id: Cell<i64>,
    affected_rows: Cell<i64>,
}

impl<E: Executor> Context<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            config: ContextConfig::default(),
            last_insert_id: Cell::new(0),
            affected_rows: Cell::new(0),
        }
    }

    pub fn with_config(mut self, config: ContextConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Toggle statement logging.
    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    /// A fresh SELECT builder.
    pub fn create_query(&self) -> SelectQb {
        SelectQb::new()
    }

    /// A fresh INSERT/UPDATE/DELETE builder.
    pub fn create_command(&self) -> MutationQb {
        MutationQb::default()
    }

    /// Insert id reported by the most recent successful write.
    pub fn last_insert_id(&self) -> i64 {
        self.last_insert_id.get()
    }

    /// Affected row count reported by the most recent successful write.
    pub fn affected_rows(&self) -> i64 {
        self.affected_rows.get()
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_inner(self) -> E {
        self.executor
    }

    fn log_sql(&self, kind: &'static str, sql: &str, param_count: usize) {
        if !self.config.debug {
            return;
        }

        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = match self.config.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        };
        emit_at_level!(
            self.config.log_level,
            target: "sqlbuild.sql",
            kind,
            param_count,
            sql = %sql,
        );
    }
}

impl<E: Executor> Executor for Context<E> {
    fn execute(&self, sql: &str, args: &[Value]) -> OrmResult<ExecResult> {
        self.log_sql("execute", sql, args.len());
        match self.executor.execute(sql, args) {
            Ok(result) => {
                self.last_insert_id.set(result.last_insert_id);
                self.affected_rows.set(result.rows_affected);
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(target: "sqlbuild.sql", error = %err, "statement failed");
                Err(err)
            }
        }
    }

    fn query(&self, sql: &str, args: &[Value]) -> OrmResult<Vec<Row>> {
        self.log_sql("query", sql, args.len());
        self.executor.query(sql, args).inspect_err(|err| {
            tracing::warn!(target: "sqlbuild.sql", error = %err, "query failed");
        })
    }
}

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
