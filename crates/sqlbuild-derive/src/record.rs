//! Record derive macro implementation

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::{parse_field_attrs, rename_all};
use crate::sql_ident::parse_column_name;

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let rule = rename_all(&input)?;
    let mut seen = HashSet::<String>::new();
    let mut entries = Vec::new();
    let mut empty_checks = Vec::new();

    for field in fields {
        let attrs = parse_field_attrs(field)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };

        let column = if let Some(lit) = &attrs.column {
            parse_column_name(&lit.value(), lit.span(), "orm column")?
        } else if let Some(lit) = &attrs.serde_rename {
            parse_column_name(&lit.value(), lit.span(), "serde rename")?
        } else {
            let raw = ident.unraw().to_string();
            let renamed = rule.map_or(raw.clone(), |rule| rule.apply(&raw));
            parse_column_name(&renamed, ident.span(), "column")?
        };
        if !seen.insert(column.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate column '{column}'"),
            ));
        }

        let is_empty = quote! { ::sqlbuild::IsEmpty::is_empty_value(&record.#ident) };
        let value = if attrs.json {
            quote! { ::sqlbuild::Value::json(&record.#ident) }
        } else {
            quote! {
                ::std::result::Result::Ok(::sqlbuild::Value::from(
                    ::std::clone::Clone::clone(&record.#ident),
                ))
            }
        };

        entries.push(quote! {
            ::sqlbuild::Field {
                name: #column,
                is_empty: |record: &#name| #is_empty,
                value: |record: &#name| #value,
            }
        });
        empty_checks.push(is_empty);
    }

    let is_empty_body = match empty_checks.split_first() {
        None => quote! { true },
        Some((first, rest)) => quote! {
            let record = self;
            #first #(&& #rest)*
        },
    };

    Ok(quote! {
        impl ::sqlbuild::Record for #name {
            const FIELDS: &'static [::sqlbuild::Field<Self>] = &[
                #(#entries),*
            ];
        }

        impl ::sqlbuild::IsEmpty for #name {
            fn is_empty_value(&self) -> bool {
                #is_empty_body
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand_err(input: DeriveInput) -> String {
        expand(input).unwrap_err().to_string()
    }

    #[test]
    fn test_column_naming_precedence() {
        let input: DeriveInput = parse_quote! {
            #[serde(rename_all = "camelCase")]
            struct User {
                #[orm(column = "email_address")]
                #[serde(rename = "mail")]
                email: String,
                #[serde(rename = "nick")]
                nick_name: String,
                created_at: i64,
                r#type: String,
            }
        };
        let out = expand(input).unwrap().to_string();
        assert!(out.contains("\"email_address\""));
        assert!(out.contains("\"nick\""));
        assert!(out.contains("\"createdAt\""));
        assert!(out.contains("\"type\""));
        assert!(!out.contains("\"mail\""));
    }

    #[test]
    fn test_skip_and_json() {
        let input: DeriveInput = parse_quote! {
            struct Post {
                title: String,
                #[orm(json)]
                tags: Vec<String>,
                #[orm(skip)]
                cache: String,
            }
        };
        let out = expand(input).unwrap().to_string();
        assert!(out.contains("Value :: json"));
        assert!(!out.contains("\"cache\""));
    }

    #[test]
    fn test_empty_struct_is_always_empty() {
        let input: DeriveInput = parse_quote! { struct Nothing {} };
        let out = expand(input).unwrap().to_string();
        assert!(out.contains("true"));
        assert!(!out.contains("let record"));
    }

    #[test]
    fn test_rejects_unsupported_shapes() {
        assert!(expand_err(parse_quote! { struct T(i32); }).contains("named fields"));
        assert!(expand_err(parse_quote! { enum E { A } }).contains("only be derived for structs"));
        assert!(expand_err(parse_quote! { struct G<T> { v: T } }).contains("generic"));
    }

    #[test]
    fn test_rejects_bad_columns() {
        let err = expand_err(parse_quote! {
            struct S {
                #[orm(column = "user name")]
                name: String,
            }
        });
        assert!(err.contains("not a valid SQL identifier"));

        let err = expand_err(parse_quote! {
            struct S {
                #[orm(column = "id")]
                a: i64,
                id: i64,
            }
        });
        assert!(err.contains("duplicate column 'id'"));
    }
}
