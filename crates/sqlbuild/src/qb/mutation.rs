//! INSERT / UPDATE / DELETE builder.

use crate::columns::{ColumnSource, ColumnValue, extract_columns};
use crate::error::{OrmError, OrmResult};
use crate::executor::Executor;
use crate::fragment::Fragment;
use crate::qb::assemble::SqlAssembler;
use crate::statement::Statement;
use crate::value::Value;

/// Which statement a [`MutationQb`] renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Insert,
    Update,
    Delete,
}

/// Write statement builder.
///
/// Columns are flattened with empty values dropped when `insert`/`update` is
/// called, so only supplied fields reach the SQL. A flattening failure is kept
/// and reported by `to_sql`/`execute` before any text is produced.
#[derive(Debug, Default)]
pub struct MutationQb {
    /// Target table
    table: String,
    /// Statement kind (set by insert/update/delete)
    mode: Option<Mode>,
    /// SET columns, in placeholder order
    columns: Vec<ColumnValue>,
    /// WHERE condition (UPDATE/DELETE)
    filter: Option<Fragment>,
    /// Column extraction error
    build_error: Option<OrmError>,
}

impl MutationQb {
    /// Create a builder targeting `table`.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Self::default()
        }
    }

    /// Set the target table.
    pub fn table(mut self, name: &str) -> Self {
        self.table = name.to_string();
        self
    }

    /// INSERT the non-empty columns of `columns`.
    ///
    /// # Example
    /// ```ignore
    /// let stmt = qb::insert_into("users")
    ///     .insert(&columns! { "name" => "alice", "age" => 0 })
    ///     .to_sql()?;
    /// assert_eq!(stmt.sql, "INSERT INTO users SET name = ?");
    /// ```
    pub fn insert<C: ColumnSource + ?Sized>(mut self, columns: &C) -> Self {
        self.mode = Some(Mode::Insert);
        self.filter = None;
        self.set_columns(columns);
        self
    }

    /// UPDATE the non-empty columns of `columns` on rows matching `condition`.
    ///
    /// `args` bind the condition's placeholders; they follow the column
    /// arguments in the final argument list.
    pub fn update<C, I>(mut self, columns: &C, condition: &str, args: I) -> Self
    where
        C: ColumnSource + ?Sized,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.mode = Some(Mode::Update);
        self.set_columns(columns);
        self.set_filter(condition, args);
        self
    }

    /// DELETE rows matching `condition`.
    ///
    /// An empty condition deletes every row of the table.
    pub fn delete<I>(mut self, condition: &str, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.mode = Some(Mode::Delete);
        self.columns.clear();
        self.build_error = None;
        self.set_filter(condition, args);
        self
    }

    /// Replace the WHERE condition with a prebuilt fragment.
    ///
    /// Only UPDATE and DELETE take a condition; a non-empty filter on an
    /// INSERT fails in `to_sql`.
    pub fn filter(mut self, fragment: Fragment) -> Self {
        self.filter = Some(fragment);
        self
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    fn set_columns<C: ColumnSource + ?Sized>(&mut self, columns: &C) {
        match extract_columns(columns, true) {
            Ok(columns) => {
                self.columns = columns;
                self.build_error = None;
            }
            Err(err) => {
                self.columns.clear();
                self.build_error = Some(err);
            }
        }
    }

    fn set_filter<I>(&mut self, condition: &str, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let fragment = Fragment::new(condition, args);
        // Stray args without a condition are kept so validation reports them.
        self.filter = (!fragment.is_empty() || !fragment.args().is_empty()).then_some(fragment);
    }

    /// DELETE with no condition text.
    fn deletes_all_rows(&self) -> bool {
        self.mode == Some(Mode::Delete) && self.filter.as_ref().is_none_or(Fragment::is_empty)
    }

    fn validate(&self) -> OrmResult<Mode> {
        let mode = self.mode.ok_or_else(|| {
            OrmError::validation("no statement kind set: call insert, update or delete")
        })?;
        if self.table.trim().is_empty() {
            return Err(OrmError::validation("table name is required"));
        }
        let has_filter = self
            .filter
            .as_ref()
            .is_some_and(|f| !f.is_empty() || !f.args().is_empty());
        if mode == Mode::Insert && has_filter {
            return Err(OrmError::validation(format!(
                "INSERT on `{}` does not take a WHERE condition",
                self.table
            )));
        }
        if matches!(mode, Mode::Insert | Mode::Update) && self.columns.is_empty() {
            return Err(OrmError::validation(format!(
                "{} on `{}` has no non-empty columns to set",
                if mode == Mode::Insert { "INSERT" } else { "UPDATE" },
                self.table
            )));
        }
        Ok(mode)
    }

    /// Build the statement text and its arguments.
    pub fn to_sql(mut self) -> OrmResult<Statement> {
        if let Some(err) = self.build_error.take() {
            return Err(err);
        }
        let mode = self.validate()?;

        let mut asm = match mode {
            Mode::Insert => SqlAssembler::new("INSERT INTO"),
            Mode::Update => SqlAssembler::new("UPDATE"),
            Mode::Delete => SqlAssembler::new("DELETE FROM"),
        };
        asm.push(&self.table);

        match mode {
            Mode::Insert => {
                asm.push_assignments("SET", self.columns);
            }
            Mode::Update => {
                asm.push_assignments("SET", self.columns);
                asm.push_fragment("WHERE", self.filter.as_ref())?;
            }
            Mode::Delete => {
                if self.deletes_all_rows() {
                    tracing::warn!(
                        target: "sqlbuild",
                        table = %self.table,
                        "DELETE without WHERE removes every row"
                    );
                }
                asm.push_fragment("WHERE", self.filter.as_ref())?;
            }
        }

        asm.finish()
    }

    /// Run the statement.
    ///
    /// Returns the last insert id for INSERT and the affected row count
    /// otherwise. Executor errors are returned unchanged.
    pub fn execute<E: Executor + ?Sized>(self, exec: &E) -> OrmResult<i64> {
        let mode = self.mode;
        let stmt = self.to_sql()?;
        let result = exec.execute(stmt.sql(), stmt.args())?;
        Ok(match mode {
            Some(Mode::Insert) => result.last_insert_id,
            _ => result.rows_affected,
        })
    }
}
