//! Condition fragments: SQL boolean text plus its ordered arguments.

use crate::error::{OrmError, OrmResult};
use crate::value::Value;

/// A raw SQL condition and the arguments for its `?` placeholders.
///
/// The number of placeholders in `text` should equal `args.len()`, in the same
/// left-to-right order. [`Fragment::validate`] checks this before a statement
/// is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    text: String,
    args: Vec<Value>,
}

impl Fragment {
    /// Create a fragment from SQL text and its arguments.
    ///
    /// # Example
    /// ```ignore
    /// let f = Fragment::new("age > ? AND status = ?", args![18, "active"]);
    /// ```
    pub fn new<I>(text: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            text: text.into().trim().to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a fragment without arguments.
    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(text, crate::args![])
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.text, self.args)
    }

    /// True when there is no condition text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// `self AND ( other )`
    pub fn and(self, other: Fragment) -> Self {
        self.combine("AND", other)
    }

    /// `self OR ( other )`
    pub fn or(self, other: Fragment) -> Self {
        self.combine("OR", other)
    }

    /// An empty left side yields `( other )` rather than a dangling operator.
    fn combine(mut self, op: &str, other: Fragment) -> Self {
        if other.is_empty() && other.args.is_empty() {
            return self;
        }
        if self.is_empty() {
            self.text = format!("( {} )", other.text);
        } else {
            self.text = format!("{} {} ( {} )", self.text, op, other.text);
        }
        self.args.extend(other.args);
        self
    }

    /// Number of `?` placeholders in the text (quoted literals excluded).
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.text)
    }

    /// Check that placeholders and arguments line up one to one.
    pub fn validate(&self) -> OrmResult<()> {
        let placeholders = self.placeholder_count();
        if placeholders != self.args.len() {
            return Err(OrmError::validation(format!(
                "condition `{}` has {} placeholder(s) but {} argument(s)",
                self.text,
                placeholders,
                self.args.len()
            )));
        }
        Ok(())
    }
}

/// Count `?` placeholders outside quoted text and comments.
///
/// Handles `'...'`, `"..."` and `` `...` `` quoting, doubled-quote escapes and
/// backslash escapes inside string literals, plus `-- ...` line comments and
/// `/* ... */` block comments.
pub fn count_placeholders(sql: &str) -> usize {
    let mut count = 0;
    let mut quote: Option<char> = None;
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            if c == '\\' && q != '`' {
                chars.next();
            } else if c == q {
                if chars.peek() == Some(&q) {
                    chars.next();
                } else {
                    quote = None;
                }
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '?' => count += 1,
            '-' if chars.peek() == Some(&'-') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            _ => {}
        }
    }
    count
}
