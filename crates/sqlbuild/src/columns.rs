//! Flattening of mappings and records into ordered column/value pairs.
//!
//! Mapping sources are ordered pair lists (`Vec<(K, V)>`, arrays, slices) or
//! maps. Records go through the static field table generated by
//! `#[derive(Record)]`. Both paths share one filtering routine, so a zero field
//! on a record is dropped exactly like a zero entry in a pair list.
//!
//! Column order follows the source: pair lists and records keep declaration
//! order, `BTreeMap` is sorted by key, and `HashMap` order is unspecified. Use a
//! pair list whenever the SQL text must be stable.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::error::{OrmError, OrmResult};
use crate::value::{IsEmpty, Value};

/// A column name with the value bound to its placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValue {
    pub name: String,
    pub value: Value,
}

impl ColumnValue {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Static descriptor for one record field: its column name plus accessors.
///
/// Tables of these are generated once per type by `#[derive(Record)]`.
pub struct Field<T> {
    /// Column name (`#[orm(column)]`, else `#[serde(rename)]`, else the field name).
    pub name: &'static str,
    /// Emptiness of the field's current value.
    pub is_empty: fn(&T) -> bool,
    /// The field's current value as a bind argument.
    pub value: fn(&T) -> OrmResult<Value>,
}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}

/// A struct whose fields map onto table columns.
///
/// Usually derived:
///
/// ```ignore
/// #[derive(sqlbuild::Record)]
/// struct UserPatch {
///     #[orm(column = "user_name")]
///     name: String,
///     age: Option<i32>,
///     #[orm(skip)]
///     cache_key: String,
/// }
/// ```
pub trait Record: Sized + 'static {
    /// Fields in declaration order.
    const FIELDS: &'static [Field<Self>];

    /// Column names in declaration order.
    fn column_names() -> Vec<&'static str> {
        Self::FIELDS.iter().map(|f| f.name).collect()
    }
}

/// Anything that can be flattened into `(column, value)` pairs.
///
/// Column names are spliced into the SQL text, so every key must be an
/// identifier (`[A-Za-z_][A-Za-z0-9_]*`), optionally backtick-quoted or
/// qualified with `.`. Any other key fails with
/// [`OrmError::InvalidColumnSource`].
pub trait ColumnSource {
    /// Flatten into ordered columns, dropping empty values when `filter_empty` is set.
    fn columns(&self, filter_empty: bool) -> OrmResult<Vec<ColumnValue>>;
}

/// Flatten `source` into ordered columns.
///
/// With `filter_empty`, every entry whose value is empty per [`IsEmpty`] is
/// dropped and every other entry appears exactly once.
pub fn extract_columns<C: ColumnSource + ?Sized>(
    source: &C,
    filter_empty: bool,
) -> OrmResult<Vec<ColumnValue>> {
    source.columns(filter_empty)
}

/// Shared filtering for every source kind.
///
/// Values are only materialized for entries that survive the filter.
fn collect_entries<'a, I, F>(entries: I, filter_empty: bool) -> OrmResult<Vec<ColumnValue>>
where
    I: IntoIterator<Item = (&'a str, bool, F)>,
    F: FnOnce() -> OrmResult<Value>,
{
    let mut out = Vec::new();
    for (name, empty, value) in entries {
        if !is_column_name(name) {
            return Err(OrmError::invalid_column_name(name));
        }
        if filter_empty && empty {
            continue;
        }
        out.push(ColumnValue {
            name: name.to_string(),
            value: value()?,
        });
    }
    Ok(out)
}

/// `name`, `` `order` `` or `t.name`.
fn is_column_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            if let Some(quoted) = part.strip_prefix('`').and_then(|p| p.strip_suffix('`')) {
                return !quoted.is_empty() && !quoted.contains('`');
            }
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

fn collect_pairs<'a, K, V, I>(pairs: I, filter_empty: bool) -> OrmResult<Vec<ColumnValue>>
where
    K: AsRef<str> + 'a,
    V: IsEmpty + Clone + Into<Value> + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    collect_entries(
        pairs.into_iter().map(|(k, v)| {
            (k.as_ref(), v.is_empty_value(), move || Ok::<_, OrmError>(v.clone().into()))
        }),
        filter_empty,
    )
}

impl<T: Record> ColumnSource for T {
    fn columns(&self, filter_empty: bool) -> OrmResult<Vec<ColumnValue>> {
        collect_entries(
            T::FIELDS
                .iter()
                .map(|f| (f.name, (f.is_empty)(self), move || (f.value)(self))),
            filter_empty,
        )
    }
}

impl<K, V> ColumnSource for [(K, V)]
where
    K: AsRef<str>,
    V: IsEmpty + Clone + Into<Value>,
{
    fn columns(&self, filter_empty: bool) -> OrmResult<Vec<ColumnValue>> {
        collect_pairs(self.iter().map(|(k, v)| (k, v)), filter_empty)
    }
}

impl<K, V, const N: usize> ColumnSource for [(K, V); N]
where
    K: AsRef<str>,
    V: IsEmpty + Clone + Into<Value>,
{
    fn columns(&self, filter_empty: bool) -> OrmResult<Vec<ColumnValue>> {
        self.as_slice().columns(filter_empty)
    }
}

impl<K, V> ColumnSource for Vec<(K, V)>
where
    K: AsRef<str>,
    V: IsEmpty + Clone + Into<Value>,
{
    fn columns(&self, filter_empty: bool) -> OrmResult<Vec<ColumnValue>> {
        self.as_slice().columns(filter_empty)
    }
}

impl<K, V> ColumnSource for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: IsEmpty + Clone + Into<Value>,
{
    fn columns(&self, filter_empty: bool) -> OrmResult<Vec<ColumnValue>> {
        collect_pairs(self.iter(), filter_empty)
    }
}

/// Column order is unspecified; prefer a pair list for stable SQL text.
impl<K, V, S> ColumnSource for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: IsEmpty + Clone + Into<Value>,
    S: BuildHasher,
{
    fn columns(&self, filter_empty: bool) -> OrmResult<Vec<ColumnValue>> {
        collect_pairs(self.iter(), filter_empty)
    }
}

impl ColumnSource for [ColumnValue] {
    fn columns(&self, filter_empty: bool) -> OrmResult<Vec<ColumnValue>> {
        collect_entries(
            self.iter().map(|c| {
                (
                    c.name.as_str(),
                    c.value.is_empty_value(),
                    move || Ok::<_, OrmError>(c.value.clone()),
                )
            }),
            filter_empty,
        )
    }
}

impl ColumnSource for Vec<ColumnValue> {
    fn columns(&self, filter_empty: bool) -> OrmResult<Vec<ColumnValue>> {
        self.as_slice().columns(filter_empty)
    }
}

impl ColumnSource for serde_json::Map<String, serde_json::Value> {
    fn columns(&self, filter_empty: bool) -> OrmResult<Vec<ColumnValue>> {
        collect_pairs(self.iter(), filter_empty)
    }
}

/// Only JSON objects are column sources; every other kind is rejected.
impl ColumnSource for serde_json::Value {
    fn columns(&self, filter_empty: bool) -> OrmResult<Vec<ColumnValue>> {
        match self {
            serde_json::Value::Object(map) => map.columns(filter_empty),
            other => Err(OrmError::invalid_column_source(json_kind(other))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(cols: &[ColumnValue]) -> Vec<&str> {
        cols.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_pairs_keep_order_and_filter_empty() {
        let src = crate::columns! { "name" => "Alice", "age" => 0, "email" => "", "score" => 1.5 };
        let cols = extract_columns(&src, true).unwrap();
        assert_eq!(names(&cols), vec!["name", "score"]);
        assert_eq!(cols[0].value, Value::Text("Alice".into()));
        assert_eq!(cols[1].value, Value::Float(1.5));
    }

    #[test]
    fn test_pairs_without_filter_keep_everything() {
        let src = [("a", 0i32), ("b", 2)];
        let cols = extract_columns(&src, false).unwrap();
        assert_eq!(names(&cols), vec!["a", "b"]);
        assert_eq!(cols[0].value, Value::Int(0));
    }

    #[test]
    fn test_option_some_zero_survives_filter() {
        let src = vec![("age", Some(0i32)), ("height", None)];
        let cols = extract_columns(&src, true).unwrap();
        assert_eq!(names(&cols), vec!["age"]);
        assert_eq!(cols[0].value, Value::Int(0));
    }

    #[test]
    fn test_btreemap_is_sorted() {
        let mut src = BTreeMap::new();
        src.insert("zeta".to_string(), 1i64);
        src.insert("alpha".to_string(), 2i64);
        src.insert("mid".to_string(), 0i64);
        let cols = extract_columns(&src, true).unwrap();
        assert_eq!(names(&cols), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_hashmap_contains_each_non_empty_entry_once() {
        let mut src = HashMap::new();
        src.insert("a", Value::from(1));
        src.insert("b", Value::Null);
        src.insert("c", Value::from("x"));
        let cols = extract_columns(&src, true).unwrap();
        let mut got = names(&cols);
        got.sort();
        assert_eq!(got, vec!["a", "c"]);
    }

    #[test]
    fn test_json_object_is_a_mapping() {
        let src = json!({"name": "Bob", "age": 0, "tags": []});
        let cols = extract_columns(&src, true).unwrap();
        assert_eq!(names(&cols), vec!["name"]);
        assert_eq!(cols[0].value, Value::Text("Bob".into()));
    }

    #[test]
    fn test_non_object_json_is_invalid() {
        for src in [json!(1), json!("x"), json!([1, 2]), json!(null)] {
            let err = extract_columns(&src, true).unwrap_err();
            assert!(err.is_invalid_column_source(), "{src}: {err}");
        }
    }

    #[test]
    fn test_column_value_list_filters_by_value() {
        let src = vec![ColumnValue::new("a", 0), ColumnValue::new("b", "x")];
        assert_eq!(names(&extract_columns(&src, true).unwrap()), vec!["b"]);
        assert_eq!(extract_columns(&src, false).unwrap().len(), 2);
    }

    #[test]
    fn test_column_names_must_be_identifiers() {
        for bad in ["", "a b", "id = 1; --", "x?", "1st", "a..b", "`a`b`"] {
            let src = vec![(bad, 1)];
            let err = extract_columns(&src, true).unwrap_err();
            assert!(err.is_invalid_column_source(), "{bad:?}: {err}");
        }
        // Rejected even when the value would have been filtered out.
        assert!(extract_columns(&[("a b", 0)], true).is_err());

        let src = [("name", 1), ("`order`", 2), ("u.id", 3)];
        assert_eq!(extract_columns(&src, true).unwrap().len(), 3);

        let src = vec![ColumnValue::new("bad key", "x")];
        assert!(extract_columns(&src, true).unwrap_err().is_invalid_column_source());

        let src = json!({"ok": 1, "not ok": 2});
        assert!(extract_columns(&src, true).unwrap_err().is_invalid_column_source());
    }

    #[derive(Debug)]
    struct Manual {
        id: i64,
        label: String,
    }

    impl Record for Manual {
        const FIELDS: &'static [Field<Self>] = &[
            Field {
                name: "id",
                is_empty: |r: &Manual| r.id.is_empty_value(),
                value: |r: &Manual| Ok(Value::from(r.id)),
            },
            Field {
                name: "label_text",
                is_empty: |r: &Manual| r.label.is_empty_value(),
                value: |r: &Manual| Ok(Value::from(r.label.clone())),
            },
        ];
    }

    #[test]
    fn test_record_uses_descriptor_table() {
        let m = Manual {
            id: 0,
            label: "hello".into(),
        };
        assert_eq!(Manual::column_names(), vec!["id", "label_text"]);
        let cols = extract_columns(&m, true).unwrap();
        assert_eq!(names(&cols), vec!["label_text"]);
        let cols = extract_columns(&m, false).unwrap();
        assert_eq!(cols[0], ColumnValue::new("id", 0i64));
    }
}
