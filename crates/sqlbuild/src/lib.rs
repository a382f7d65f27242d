//! # sqlbuild
//!
//! A fluent builder for parameterized SQL statements using `?` placeholders.
//!
//! Builders turn tables, columns, conditions, joins and pagination into SQL text
//! plus a positional argument list. Execution is delegated to an [`Executor`]
//! supplied by the caller (the database driver lives outside this crate).
//!
//! ## Features
//!
//! - **Aligned arguments**: every `?` in the emitted text lines up with one argument
//! - **Partial writes**: zero-valued columns are dropped from INSERT/UPDATE payloads
//! - **Deterministic columns**: records flatten through a derive-generated field table
//! - **Value builders**: every setter consumes and returns the builder, so state never leaks
//!
//! ## Query Builder (qb)
//!
//! ```ignore
//! use sqlbuild::{args, columns, qb, MutationQb, SelectQb};
//!
//! // SELECT
//! let rows = qb::select_from("users")
//!     .where_("status = ?", args!["active"])
//!     .and_where("age > ?", args![18])
//!     .order_by("created_at DESC")
//!     .limit(10)
//!     .all(&ctx)?;
//!
//! // INSERT (empty values are skipped)
//! let id = qb::insert_into("users")
//!     .insert(&columns! { "name" => "alice", "age" => 0 })
//!     .execute(&ctx)?;
//!
//! // UPDATE
//! qb::update("users")
//!     .update(&patch, "id = ?", args![id])
//!     .execute(&ctx)?;
//!
//! // DELETE
//! qb::delete_from("users")
//!     .delete("id = ?", args![id])
//!     .execute(&ctx)?;
//! ```

// Lets `#[derive(Record)]` output (which names `::sqlbuild`) compile inside this crate's tests.
extern crate self as sqlbuild;

pub mod columns;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod fragment;
pub mod prelude;
pub mod qb;
pub mod row;
pub mod statement;
pub mod value;

pub use columns::{ColumnSource, ColumnValue, Field, Record, extract_columns};
pub use config::ContextConfig;
pub use context::Context;
pub use error::{OrmError, OrmResult};
pub use executor::{ExecResult, Executor};
pub use fragment::{Fragment, count_placeholders};
pub use row::{RawValue, Row};
pub use statement::Statement;
pub use value::{IsEmpty, Value};

// Re-export qb builders for easy access
pub use qb::{
    JoinKind, Mode, MutationQb, SelectQb, command, delete_from, insert_into, select, select_from,
    update,
};

#[cfg(feature = "derive")]
pub use sqlbuild_derive::Record;

/// Build a `Vec<Value>` of positional arguments from heterogeneous expressions.
///
/// ```ignore
/// let args = sqlbuild::args!["alice", 42, 3.5];
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}

/// Build an ordered column list (`Vec<(&str, Value)>`) for INSERT/UPDATE payloads.
///
/// ```ignore
/// let cols = sqlbuild::columns! { "name" => "alice", "age" => 30 };
/// ```
#[macro_export]
macro_rules! columns {
    () => {
        ::std::vec::Vec::<(&'static str, $crate::Value)>::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$(($name, $crate::Value::from($value))),+]
    };
}
