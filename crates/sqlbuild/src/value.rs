//! Bind values and the emptiness rules used for column filtering.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::error::OrmResult;

/// A positional argument bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
    DateTime(NaiveDateTime),
    Uuid(uuid::Uuid),
}

impl Value {
    /// Serialize any value into a `Value::Json` argument.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> OrmResult<Self> {
        Ok(Value::Json(serde_json::to_value(value)?))
    }

    /// Whether this is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short kind name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Json(_) => "json",
            Value::DateTime(_) => "datetime",
            Value::Uuid(_) => "uuid",
        }
    }
}

macro_rules! impl_from_lossless {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )+
    };
}

impl_from_lossless!(Int: i8, i16, i32, i64);
impl_from_lossless!(UInt: u8, u16, u32, u64);
impl_from_lossless!(Float: f32, f64);
impl_from_lossless!(Bool: bool);
impl_from_lossless!(Text: String, &str, &String);
impl_from_lossless!(Bytes: Vec<u8>, &[u8]);
impl_from_lossless!(DateTime: NaiveDateTime);
impl_from_lossless!(Uuid: uuid::Uuid);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::UInt(value as u64)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(value: DateTime<Tz>) -> Self {
        Value::DateTime(value.naive_utc())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

/// JSON scalars become native arguments; arrays and objects stay JSON.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Json(other),
        }
    }
}

/// Decides whether a value counts as "not supplied" when filtering columns.
///
/// - numbers are empty iff zero
/// - strings are empty iff they have no bytes
/// - `Option` is empty iff `None` (`Some(0)` is a supplied zero)
/// - sequences and maps are empty iff they have no elements
/// - derived records are empty iff every field is empty
/// - everything else (`bool`, timestamps, boxes) is never empty
pub trait IsEmpty {
    fn is_empty_value(&self) -> bool;
}

macro_rules! impl_is_empty_zero {
    ($zero:literal: $($ty:ty),+) => {
        $(
            impl IsEmpty for $ty {
                fn is_empty_value(&self) -> bool {
                    *self == $zero
                }
            }
        )+
    };
}

impl_is_empty_zero!(0: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_is_empty_zero!(0.0: f32, f64);

macro_rules! impl_never_empty {
    ($($ty:ty),+) => {
        $(
            impl IsEmpty for $ty {
                fn is_empty_value(&self) -> bool {
                    false
                }
            }
        )+
    };
}

impl_never_empty!(bool, char, NaiveDateTime, chrono::NaiveDate, chrono::NaiveTime);

impl<Tz: TimeZone> IsEmpty for DateTime<Tz> {
    fn is_empty_value(&self) -> bool {
        false
    }
}

impl IsEmpty for str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl IsEmpty for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsEmpty for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

impl<T> IsEmpty for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> IsEmpty for HashMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> IsEmpty for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: ?Sized> IsEmpty for Box<T> {
    fn is_empty_value(&self) -> bool {
        false
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for &T {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl IsEmpty for uuid::Uuid {
    fn is_empty_value(&self) -> bool {
        self.is_nil()
    }
}

impl IsEmpty for serde_json::Value {
    fn is_empty_value(&self) -> bool {
        match self {
            serde_json::Value::Null => true,
            serde_json::Value::Bool(_) => false,
            serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
            serde_json::Value::String(s) => s.is_empty(),
            serde_json::Value::Array(a) => a.is_empty(),
            serde_json::Value::Object(o) => o.is_empty(),
        }
    }
}

impl IsEmpty for Value {
    fn is_empty_value(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(_) => false,
            Value::Int(v) => *v == 0,
            Value::UInt(v) => *v == 0,
            Value::Float(v) => *v == 0.0,
            Value::Text(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
            Value::Json(j) => j.is_empty_value(),
            Value::DateTime(_) => false,
            Value::Uuid(u) => u.is_nil(),
        }
    }
}
