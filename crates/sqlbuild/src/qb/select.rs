//! SELECT query builder.

use crate::error::{OrmError, OrmResult};
use crate::executor::Executor;
use crate::fragment::Fragment;
use crate::qb::assemble::SqlAssembler;
use crate::row::{RawValue, Row};
use crate::statement::Statement;
use crate::value::Value;

/// JOIN flavours accepted by [`SelectQb::join`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Cross,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// SELECT query builder.
///
/// Rendered as
/// `SELECT [DISTINCT] <fields> FROM <table> [JOIN..] [WHERE..] [GROUP BY..] [HAVING..] [ORDER BY..] [LIMIT..]`.
#[derive(Clone, Debug)]
pub struct SelectQb {
    /// Table or FROM expression
    table: String,
    /// SELECT list (default "*")
    projection: String,
    /// DISTINCT modifier text
    distinct: String,
    /// JOIN clauses
    joins: Vec<String>,
    /// WHERE condition
    filter: Option<Fragment>,
    /// GROUP BY clause
    group_by: String,
    /// HAVING condition
    having: Option<Fragment>,
    /// ORDER BY clause
    order_by: String,
    /// OFFSET (0 = none)
    offset: u64,
    /// LIMIT (0 = none)
    limit: u64,
}

impl Default for SelectQb {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectQb {
    /// Create a builder selecting `*` with no table yet.
    pub fn new() -> Self {
        Self {
            table: String::new(),
            projection: "*".to_string(),
            distinct: String::new(),
            joins: Vec::new(),
            filter: None,
            group_by: String::new(),
            having: None,
            order_by: String::new(),
            offset: 0,
            limit: 0,
        }
    }

    /// Clear everything except the table.
    pub fn reset(self) -> Self {
        Self {
            table: self.table,
            ..Self::new()
        }
    }

    // ==================== SELECT list ====================

    /// Set the SELECT list (string form, supports complex expressions).
    pub fn select(mut self, fields: &str) -> Self {
        self.projection = fields.to_string();
        self
    }

    /// Add `DISTINCT`.
    pub fn distinct(self) -> Self {
        self.distinct_clause("DISTINCT")
    }

    /// Set a custom modifier placed before the SELECT list (e.g. `DISTINCTROW`).
    pub fn distinct_clause(mut self, clause: &str) -> Self {
        self.distinct = clause.to_string();
        self
    }

    // ==================== FROM / JOIN ====================

    /// Set the table or FROM expression.
    pub fn from(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    /// Append a JOIN clause. Joins render in call order.
    pub fn join(mut self, kind: JoinKind, table: &str, on: &str) -> Self {
        let on = on.trim();
        if on.is_empty() {
            self.joins.push(format!("{} {}", kind.keyword(), table));
        } else {
            self.joins.push(format!("{} {} ON {}", kind.keyword(), table, on));
        }
        self
    }

    /// Add LEFT JOIN.
    pub fn left_join(self, table: &str, on: &str) -> Self {
        self.join(JoinKind::Left, table, on)
    }

    /// Add RIGHT JOIN.
    pub fn right_join(self, table: &str, on: &str) -> Self {
        self.join(JoinKind::Right, table, on)
    }

    /// Add INNER JOIN.
    pub fn inner_join(self, table: &str, on: &str) -> Self {
        self.join(JoinKind::Inner, table, on)
    }

    // ==================== WHERE ====================

    /// Replace the WHERE condition (text and arguments).
    pub fn where_<I>(mut self, condition: &str, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.filter = Some(Fragment::new(condition, args));
        self
    }

    /// Append ` AND ( condition )`; becomes the whole WHERE if none exists yet.
    pub fn and_where<I>(mut self, condition: &str, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let current = self.filter.take().unwrap_or_default();
        self.filter = Some(current.and(Fragment::new(condition, args)));
        self
    }

    /// Append ` OR ( condition )`; becomes the whole WHERE if none exists yet.
    pub fn or_where<I>(mut self, condition: &str, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let current = self.filter.take().unwrap_or_default();
        self.filter = Some(current.or(Fragment::new(condition, args)));
        self
    }

    /// Replace the WHERE condition with a prebuilt fragment.
    pub fn filter(mut self, fragment: Fragment) -> Self {
        self.filter = Some(fragment);
        self
    }

    // ==================== Ordering & Grouping ====================

    /// Set ORDER BY clause.
    pub fn order_by(mut self, clause: &str) -> Self {
        self.order_by = clause.to_string();
        self
    }

    /// Set GROUP BY clause.
    pub fn group_by(mut self, clause: &str) -> Self {
        self.group_by = clause.to_string();
        self
    }

    /// Set HAVING condition without parameters.
    pub fn having(mut self, clause: &str) -> Self {
        self.having = Some(Fragment::raw(clause));
        self
    }

    /// Set HAVING condition with `?` placeholders; its args follow the WHERE args.
    pub fn having_with<I>(mut self, clause: &str, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.having = Some(Fragment::new(clause, args));
        self
    }

    // ==================== Pagination ====================

    /// Set OFFSET (only rendered together with a LIMIT).
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = n;
        self
    }

    /// Set LIMIT (0 means no limit).
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = n;
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    /// The offset saturates at `u64::MAX` for out-of-range pages.
    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        let p = page.max(1);
        let size = per_page.max(1);
        self.limit = size;
        self.offset = (p - 1).saturating_mul(size);
        self
    }

    // ==================== Build ====================

    fn limit_clause(&self) -> String {
        match (self.offset, self.limit) {
            (_, 0) => String::new(),
            (0, limit) => format!("LIMIT {limit}"),
            (offset, limit) => format!("LIMIT {offset},{limit}"),
        }
    }

    /// Build the statement text and its arguments.
    pub fn to_sql(self) -> OrmResult<Statement> {
        if self.table.trim().is_empty() {
            return Err(OrmError::validation("SELECT requires a table: call from"));
        }
        let projection = match self.projection.trim() {
            "" => "*",
            fields => fields,
        };

        let mut asm = SqlAssembler::new("SELECT");
        asm.push(&self.distinct)
            .push(projection)
            .push_clause("FROM", &self.table);
        for join in &self.joins {
            asm.push(join);
        }
        asm.push_fragment("WHERE", self.filter.as_ref())?;
        asm.push_clause("GROUP BY", &self.group_by);
        asm.push_fragment("HAVING", self.having.as_ref())?;
        asm.push_clause("ORDER BY", &self.order_by);
        asm.push(&self.limit_clause());

        asm.finish()
    }

    // ==================== Execution ====================

    /// Run the query and return every row in result order.
    pub fn all<E: Executor + ?Sized>(self, exec: &E) -> OrmResult<Vec<Row>> {
        let stmt = self.to_sql()?;
        exec.query(stmt.sql(), stmt.args())
    }

    /// Run the query with LIMIT 1 (keeping any offset).
    ///
    /// An empty result is `Ok(None)`, not an error.
    pub fn one<E: Executor + ?Sized>(self, exec: &E) -> OrmResult<Option<Row>> {
        let rows = self.limit(1).all(exec)?;
        Ok(rows.into_iter().next())
    }

    /// Run the query and collect one column from every row.
    ///
    /// Rows without the column contribute a NULL cell.
    pub fn column<E: Executor + ?Sized>(self, name: &str, exec: &E) -> OrmResult<Vec<RawValue>> {
        let rows = self.all(exec)?;
        Ok(rows.iter().map(|row| row.value(name)).collect())
    }

    /// `SELECT COUNT(*) as COUNT ...` through [`SelectQb::one`].
    ///
    /// Never fails: executor errors, an empty result and unparsable counts
    /// all yield 0 (and are logged). Use `one`/`all` to observe errors.
    pub fn count<E: Executor + ?Sized>(self, exec: &E) -> i64 {
        let table = self.table.clone();
        match self.select("COUNT(*) as COUNT").one(exec) {
            Ok(Some(row)) => match row.get("COUNT").and_then(|v| v.parse::<i64>()) {
                Some(n) => n,
                None => {
                    tracing::warn!(target: "sqlbuild", %table, "COUNT column missing or not an integer");
                    0
                }
            },
            Ok(None) => 0,
            Err(err) => {
                tracing::warn!(target: "sqlbuild", %table, error = %err, "count query failed");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    fn sql(qb: SelectQb) -> String {
        qb.to_sql().unwrap().sql
    }

    #[test]
    fn test_simple_select() {
        assert_eq!(sql(SelectQb::new().from("users")), "SELECT * FROM users");
    }

    #[test]
    fn test_select_with_columns() {
        let qb = SelectQb::new().from("users").select("id, name, email");
        assert_eq!(sql(qb), "SELECT id, name, email FROM users");
    }

    #[test]
    fn test_distinct() {
        let qb = SelectQb::new().from("users").select("city").distinct();
        assert_eq!(sql(qb), "SELECT DISTINCT city FROM users");
    }

    #[test]
    fn test_joins_render_in_order() {
        let qb = SelectQb::new()
            .from("users u")
            .inner_join("orders o", "u.id = o.user_id")
            .left_join("refunds r", "r.order_id = o.id")
            .join(JoinKind::Cross, "regions", "");
        assert_eq!(
            sql(qb),
            "SELECT * FROM users u INNER JOIN orders o ON u.id = o.user_id \
             LEFT JOIN refunds r ON r.order_id = o.id CROSS JOIN regions"
        );
    }

    #[test]
    fn test_pagination_forms() {
        let base = SelectQb::new().from("t");
        assert_eq!(sql(base.clone().offset(10).limit(20)), "SELECT * FROM t LIMIT 10,20");
        assert_eq!(sql(base.clone().limit(20)), "SELECT * FROM t LIMIT 20");
        assert_eq!(sql(base.clone().offset(10)), "SELECT * FROM t");
        assert_eq!(sql(base), "SELECT * FROM t");
    }

    #[test]
    fn test_paginate() {
        let qb = SelectQb::new().from("users").paginate(3, 25);
        assert_eq!(sql(qb), "SELECT * FROM users LIMIT 50,25");
        let qb = SelectQb::new().from("users").paginate(0, 0);
        assert_eq!(sql(qb), "SELECT * FROM users LIMIT 1");
    }

    #[test]
    fn test_paginate_huge_page_saturates() {
        let qb = SelectQb::new().from("t").paginate(u64::MAX, 100);
        assert_eq!(
            sql(qb),
            format!("SELECT * FROM t LIMIT {},100", u64::MAX)
        );
    }

    #[test]
    fn test_bare_placeholder_outside_conditions_is_rejected() {
        let err = SelectQb::new()
            .from("u")
            .left_join("o", "o.uid = u.id AND o.k = ?")
            .where_("u.id = ?", args![1])
            .to_sql()
            .unwrap_err();
        assert!(err.is_validation());

        let err = SelectQb::new()
            .from("t")
            .order_by("FIELD(id, ?)")
            .to_sql()
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_where_replaces() {
        let stmt = SelectQb::new()
            .from("t")
            .where_("a = ?", args![1])
            .where_("b = ?", args![2])
            .to_sql()
            .unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM t WHERE b = ?");
        assert_eq!(stmt.args, args![2]);
    }

    #[test]
    fn test_leading_and_where_is_not_dangling() {
        let stmt = SelectQb::new()
            .from("t")
            .and_where("a = ?", args![1])
            .to_sql()
            .unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM t WHERE ( a = ? )");

        let stmt = SelectQb::new()
            .from("t")
            .or_where("a = ?", args![1])
            .or_where("b = ?", args![2])
            .to_sql()
            .unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM t WHERE ( a = ? ) OR ( b = ? )");
    }

    #[test]
    fn test_reset_keeps_table() {
        let qb = SelectQb::new()
            .from("t")
            .select("a")
            .where_("a = ?", args![1])
            .limit(5)
            .reset();
        assert_eq!(sql(qb), "SELECT * FROM t");
    }

    #[test]
    fn test_missing_table() {
        assert!(SelectQb::new().to_sql().unwrap_err().is_validation());
    }
}
