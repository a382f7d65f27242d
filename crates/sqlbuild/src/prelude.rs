//! Convenient imports for typical `sqlbuild` usage.
//!
//! ```ignore
//! use sqlbuild::prelude::*;
//! ```

pub use crate::{
    ColumnSource, Context, ContextConfig, ExecResult, Executor, Fragment, IsEmpty, MutationQb,
    OrmError, OrmResult, RawValue, Record, Row, SelectQb, Statement, Value, args, columns, qb,
};
