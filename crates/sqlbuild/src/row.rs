//! Result rows returned by an [`Executor`](crate::Executor).

use bytes::Bytes;
use std::collections::HashMap;
use std::str::FromStr;

/// The raw bytes of one result cell; `None` is SQL NULL.
///
/// Accessors never fail: unparsable text reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawValue(Option<Bytes>);

impl RawValue {
    pub fn null() -> Self {
        Self(None)
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Raw bytes (empty for NULL).
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_deref().unwrap_or_default()
    }

    /// UTF-8 view, if the cell is non-NULL valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Text with invalid UTF-8 replaced (empty for NULL).
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }

    /// Parse the trimmed text as `T`.
    pub fn parse<T: FromStr>(&self) -> Option<T> {
        self.as_str()?.trim().parse().ok()
    }

    /// Integer value, 0 if NULL or not an integer.
    pub fn as_int(&self) -> i64 {
        self.parse().unwrap_or(0)
    }

    /// Float value, 0.0 if NULL or not a number.
    pub fn as_float(&self) -> f64 {
        self.parse().unwrap_or(0.0)
    }

    pub fn into_bytes(self) -> Option<Bytes> {
        self.0
    }
}

impl From<Bytes> for RawValue {
    fn from(value: Bytes) -> Self {
        Self(Some(value))
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(value: Vec<u8>) -> Self {
        Self(Some(Bytes::from(value)))
    }
}

impl From<&[u8]> for RawValue {
    fn from(value: &[u8]) -> Self {
        Self(Some(Bytes::copy_from_slice(value)))
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self(Some(Bytes::from(value)))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self(Some(Bytes::copy_from_slice(value.as_bytes())))
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self(None), Into::into)
    }
}

/// One result row: column name to raw cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: HashMap<String, RawValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing any previous cell with the same name.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<RawValue>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Chainable form of [`Row::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.columns.get(column)
    }

    /// The cell for `column`, or a NULL cell if the row has no such column.
    pub fn value(&self, column: &str) -> RawValue {
        self.get(column).cloned().unwrap_or_default()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_map(self) -> HashMap<String, RawValue> {
        self.columns
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, RawValue>> for Row {
    fn from(columns: HashMap<String, RawValue>) -> Self {
        Self { columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_accessors() {
        assert_eq!(RawValue::from("42").as_int(), 42);
        assert_eq!(RawValue::from(" 7 ").as_int(), 7);
        assert_eq!(RawValue::from("abc").as_int(), 0);
        assert_eq!(RawValue::null().as_int(), 0);
        assert_eq!(RawValue::from("2.5").as_float(), 2.5);
        assert_eq!(RawValue::from("x").as_float(), 0.0);
    }

    #[test]
    fn test_text_accessors() {
        let v = RawValue::from("hello");
        assert_eq!(v.as_str(), Some("hello"));
        assert_eq!(v.to_string_lossy(), "hello");
        assert_eq!(v.as_bytes(), b"hello");
        assert!(!v.is_null());

        let null = RawValue::null();
        assert_eq!(null.as_str(), None);
        assert_eq!(null.to_string_lossy(), "");
        assert!(null.as_bytes().is_empty());
    }

    #[test]
    fn test_missing_column_reads_as_null() {
        let row: Row = [("id", "1")].into_iter().collect();
        assert_eq!(row.value("id").as_int(), 1);
        assert!(row.value("missing").is_null());
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn test_option_cells() {
        let row = Row::new()
            .with("a", Some("x"))
            .with("b", None::<&str>);
        assert_eq!(row.value("a").as_str(), Some("x"));
        assert!(row.get("b").is_some_and(RawValue::is_null));
        assert_eq!(row.len(), 2);
    }
}
