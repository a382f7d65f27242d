//! Attribute parsing for the Record derive macro.
//!
//! Reads field-level `#[orm(...)]` plus the serde naming attributes that decide
//! a field's serialized name.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::meta::ParseNestedMeta;
use syn::{DeriveInput, Error, LitStr, Result, Token};

/// Field-level attributes
#[derive(Default)]
pub(crate) struct FieldAttrs {
    /// `#[orm(column = "...")]`
    pub column: Option<LitStr>,
    /// `#[orm(skip)]`
    pub skip: bool,
    /// `#[orm(json)]`
    pub json: bool,
    /// `#[serde(rename = "...")]` or `#[serde(rename(serialize = "..."))]`
    pub serde_rename: Option<LitStr>,
}

pub(crate) fn parse_field_attrs(field: &syn::Field) -> Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in &field.attrs {
        if attr.path().is_ident("orm") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("column") {
                    out.column = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                } else if meta.path.is_ident("json") {
                    out.json = true;
                } else {
                    return Err(meta.error("unsupported orm attribute (expected column, skip or json)"));
                }
                Ok(())
            })?;
        } else if attr.path().is_ident("serde") {
            // serde validates its own attributes; anything unreadable here is ignored.
            if let Ok(Some(rename)) = serde_name(attr, "rename") {
                out.serde_rename = Some(rename);
            }
        }
    }

    if out.skip && (out.column.is_some() || out.json) {
        return Err(Error::new_spanned(
            field,
            "#[orm(skip)] cannot be combined with column or json",
        ));
    }
    Ok(out)
}

/// Struct-level `#[serde(rename_all = "...")]`.
pub(crate) fn rename_all(input: &DeriveInput) -> Result<Option<RenameRule>> {
    for attr in &input.attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        if let Ok(Some(lit)) = serde_name(attr, "rename_all") {
            return RenameRule::from_lit(&lit).map(Some);
        }
    }
    Ok(None)
}

/// Find `key = "..."` or `key(serialize = "...")` inside one `#[serde(...)]`.
fn serde_name(attr: &syn::Attribute, key: &str) -> Result<Option<LitStr>> {
    let mut found = None;
    attr.parse_nested_meta(|meta| {
        if !meta.path.is_ident(key) {
            return skip_meta(&meta);
        }
        if meta.input.peek(Token![=]) {
            found = Some(meta.value()?.parse()?);
            return Ok(());
        }
        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("serialize") {
                found = Some(inner.value()?.parse()?);
                Ok(())
            } else {
                skip_meta(&inner)
            }
        })
    })?;
    Ok(found)
}

fn skip_meta(meta: &ParseNestedMeta) -> Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_meta(&inner))?;
    }
    Ok(())
}

/// serde's field renaming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn from_lit(lit: &LitStr) -> Result<Self> {
        Ok(match lit.value().as_str() {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "PascalCase" => Self::Pascal,
            "camelCase" => Self::Camel,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            "kebab-case" => Self::Kebab,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebab,
            other => {
                return Err(Error::new(
                    lit.span(),
                    format!("unknown serde rename_all rule `{other}`"),
                ));
            }
        })
    }

    pub(crate) fn apply(self, field: &str) -> String {
        match self {
            Self::Lower => field.to_ascii_lowercase(),
            Self::Upper => field.to_ascii_uppercase(),
            Self::Pascal => field.to_upper_camel_case(),
            Self::Camel => field.to_lower_camel_case(),
            Self::Snake => field.to_snake_case(),
            Self::ScreamingSnake => field.to_shouty_snake_case(),
            Self::Kebab => field.to_kebab_case(),
            Self::ScreamingKebab => field.to_shouty_kebab_case(),
        }
    }
}
