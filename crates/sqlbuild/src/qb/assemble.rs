//! Positional statement assembly.
//!
//! A statement is an ordered list of clause segments. Each segment carries its
//! own text and arguments; empty segments contribute nothing. Arguments are
//! appended in segment order, which is also placeholder order.

use crate::columns::ColumnValue;
use crate::error::{OrmError, OrmResult};
use crate::fragment::Fragment;
use crate::statement::Statement;
use crate::value::Value;

#[derive(Debug, Default)]
pub(crate) struct SqlAssembler {
    sql: String,
    args: Vec<Value>,
}

impl SqlAssembler {
    pub(crate) fn new(head: &str) -> Self {
        Self {
            sql: head.to_string(),
            args: Vec::new(),
        }
    }

    /// Append ` text`; empty text is skipped.
    pub(crate) fn push(&mut self, text: &str) -> &mut Self {
        let text = text.trim();
        if !text.is_empty() {
            if !self.sql.is_empty() {
                self.sql.push(' ');
            }
            self.sql.push_str(text);
        }
        self
    }

    /// Append ` KEYWORD body` when `body` is non-empty.
    pub(crate) fn push_clause(&mut self, keyword: &str, body: &str) -> &mut Self {
        let body = body.trim();
        if !body.is_empty() {
            self.push(keyword);
            self.push(body);
        }
        self
    }

    /// Append ` KEYWORD <fragment>` and its arguments.
    ///
    /// Fails if the fragment's placeholders and arguments do not line up.
    pub(crate) fn push_fragment(
        &mut self,
        keyword: &str,
        fragment: Option<&Fragment>,
    ) -> OrmResult<&mut Self> {
        let Some(fragment) = fragment else {
            return Ok(self);
        };
        fragment.validate()?;
        if !fragment.is_empty() {
            self.push(keyword);
            self.push(fragment.text());
            self.args.extend(fragment.args().iter().cloned());
        }
        Ok(self)
    }

    /// Append ` KEYWORD a = ?, b = ?` and the column values, in column order.
    pub(crate) fn push_assignments(&mut self, keyword: &str, columns: Vec<ColumnValue>) -> &mut Self {
        if columns.is_empty() {
            return self;
        }
        let mut names = Vec::with_capacity(columns.len());
        for column in columns {
            names.push(format!("{} = ?", column.name));
            self.args.push(column.value);
        }
        self.push(keyword);
        self.push(&names.join(", "))
    }

    /// Fails when the assembled text and the argument list disagree, e.g. a bare
    /// `?` in JOIN, ORDER BY or projection text that carries no argument.
    pub(crate) fn finish(self) -> OrmResult<Statement> {
        let placeholders = crate::fragment::count_placeholders(&self.sql);
        if placeholders != self.args.len() {
            return Err(OrmError::validation(format!(
                "statement `{}` has {} placeholder(s) but {} argument(s)",
                self.sql,
                placeholders,
                self.args.len()
            )));
        }
        Ok(Statement::new(self.sql, self.args))
    }
}
