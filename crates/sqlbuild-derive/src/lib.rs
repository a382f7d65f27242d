//! Derive macros for sqlbuild
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod record;
mod sql_ident;

/// Derive `Record` (and `IsEmpty`) for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// use sqlbuild::Record;
///
/// #[derive(Record, serde::Serialize)]
/// #[serde(rename_all = "camelCase")]
/// struct UserPatch {
///     user_name: String,
///     #[orm(column = "email_address")]
///     email: Option<String>,
///     #[orm(json)]
///     tags: Vec<String>,
///     #[orm(skip)]
///     cache_key: String,
/// }
/// ```
///
/// # Generated
///
/// - `impl Record` with a static `FIELDS` table in declaration order
/// - `impl IsEmpty`: the record is empty iff every non-skipped field is empty
///
/// # Column names
///
/// 1. `#[orm(column = "name")]`
/// 2. `#[serde(rename = "name")]` (the serialization name)
/// 3. struct-level `#[serde(rename_all = "...")]` applied to the field name
/// 4. the field name
///
/// # Attributes
///
/// - `#[orm(column = "name")]` - Map field to a different column name
/// - `#[orm(skip)]` - Leave the field out of the column list
/// - `#[orm(json)]` - Bind the field serialized as a JSON argument
///
/// Every non-skipped field type must implement `IsEmpty`; plain fields also need
/// `Clone + Into<Value>`, and `json` fields need `Serialize`. Nested records can be
/// stored as JSON since the derive implements `IsEmpty` for them.
#[proc_macro_derive(Record, attributes(orm))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
