#![allow(dead_code)]

mod common;

use common::MockExecutor;
use serde::Serialize;
use sqlbuild::{ColumnSource, IsEmpty, Record, Value, args, extract_columns, qb};

#[derive(Record)]
struct UserPatch {
    name: String,
    age: i32,
    #[orm(column = "email_address")]
    email: Option<String>,
    #[orm(skip)]
    cache_key: String,
}

#[derive(Record, Serialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    display_name: String,
    #[serde(rename = "bio_text")]
    bio: String,
    #[orm(json)]
    tags: Vec<String>,
}

#[derive(Record, Serialize, Clone)]
struct Address {
    city: String,
    zip: String,
}

#[derive(Record)]
struct Customer {
    name: String,
    #[orm(json)]
    address: Address,
    external_id: uuid::Uuid,
    active: bool,
}

fn patch(name: &str, age: i32) -> UserPatch {
    UserPatch {
        name: name.to_string(),
        age,
        email: None,
        cache_key: "ignored".into(),
    }
}

#[test]
fn column_names_follow_declaration_order() {
    assert_eq!(UserPatch::column_names(), vec!["name", "age", "email_address"]);
    assert_eq!(Profile::column_names(), vec!["displayName", "bio_text", "tags"]);
}

#[test]
fn zero_fields_are_dropped() {
    let cols = extract_columns(&patch("alice", 0), true).unwrap();
    let names: Vec<_> = cols.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["name"]);

    let all = patch("alice", 0).columns(false).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].value, Value::Null);
}

#[test]
fn some_zero_is_a_supplied_value() {
    #[derive(Record)]
    struct Counter {
        hits: Option<i64>,
    }
    let cols = extract_columns(&Counter { hits: Some(0) }, true).unwrap();
    assert_eq!(cols.len(), 1);
    assert_eq!(cols[0].value, Value::Int(0));
    assert!(extract_columns(&Counter { hits: None }, true).unwrap().is_empty());
}

#[test]
fn json_fields_bind_serialized() {
    let profile = Profile {
        display_name: "Ann".into(),
        bio: String::new(),
        tags: vec!["rust".into()],
    };
    let cols = extract_columns(&profile, true).unwrap();
    assert_eq!(cols.len(), 2);
    assert_eq!(cols[1].name, "tags");
    assert_eq!(cols[1].value, Value::Json(serde_json::json!(["rust"])));
}

#[test]
fn record_emptiness_is_recursive() {
    let empty = Address {
        city: String::new(),
        zip: String::new(),
    };
    assert!(empty.is_empty_value());

    let customer = Customer {
        name: "Zed".into(),
        address: empty.clone(),
        external_id: uuid::Uuid::nil(),
        active: false,
    };
    let names: Vec<_> = extract_columns(&customer, true)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    // `active` is a bool and never empty; the nil uuid and blank address are.
    assert_eq!(names, vec!["name", "active"]);

    let customer = Customer {
        address: Address {
            city: "Oslo".into(),
            zip: String::new(),
        },
        ..customer
    };
    assert!(!customer.address.is_empty_value());
    assert_eq!(extract_columns(&customer, true).unwrap().len(), 3);
}

#[test]
fn derived_record_drives_update() {
    let db = MockExecutor::new().with_result(1, 0);
    qb::update("users")
        .update(&patch("Alice", 31), "id = ?", args![5])
        .execute(&db)
        .unwrap();

    let call = db.last();
    assert_eq!(call.sql, "UPDATE users SET name = ?, age = ? WHERE id = ?");
    assert_eq!(call.args, args!["Alice", 31, 5]);
}

#[test]
fn empty_record_update_is_rejected() {
    let err = qb::update("users")
        .update(&patch("", 0), "id = ?", args![5])
        .to_sql()
        .unwrap_err();
    assert!(err.is_validation());
}
