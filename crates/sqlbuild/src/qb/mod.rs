//! Statement builders.
//!
//! # Features
//!
//! - **Positional assembly**: clauses are appended in template order, each at most once,
//!   and their arguments follow the same order
//! - **No marker substitution**: user SQL is never searched or rewritten
//! - **Consuming builders**: every setter takes `self`, so a finished statement
//!   cannot leak configuration into the next one
//!
//! # Usage
//!
//! ```ignore
//! use sqlbuild::{args, qb};
//!
//! let stmt = qb::select_from("users u")
//!     .left_join("orders o", "u.id = o.user_id")
//!     .where_("u.status = ?", args!["active"])
//!     .or_where("u.vip = ?", args![true])
//!     .group_by("u.id")
//!     .offset(20)
//!     .limit(10)
//!     .to_sql()?;
//!
//! let stmt = qb::update("users")
//!     .update(&patch, "id = ?", args![7])
//!     .to_sql()?;
//! ```

mod assemble;
mod mutation;
mod select;

pub use mutation::{Mode, MutationQb};
pub use select::{JoinKind, SelectQb};

/// Create an empty SELECT builder (set the table with `from`).
pub fn select() -> SelectQb {
    SelectQb::new()
}

/// Create a SELECT builder for the given table or FROM expression.
///
/// # Example
/// ```ignore
/// let qb = sqlbuild::qb::select_from("users u").inner_join("orders o", "u.id = o.user_id");
/// ```
pub fn select_from(table: &str) -> SelectQb {
    SelectQb::new().from(table)
}

/// Create an empty mutation builder (set the table with `table`).
pub fn command() -> MutationQb {
    MutationQb::default()
}

/// Create a mutation builder targeting `table`; follow with `insert`.
pub fn insert_into(table: &str) -> MutationQb {
    MutationQb::new(table)
}

/// Create a mutation builder targeting `table`; follow with `update`.
pub fn update(table: &str) -> MutationQb {
    MutationQb::new(table)
}

/// Create a mutation builder targeting `table`; follow with `delete`.
pub fn delete_from(table: &str) -> MutationQb {
    MutationQb::new(table)
}
