//! Basic usage example for sqlbuild
//!
//! Run with: cargo run --example basic -p sqlbuild
//!
//! Statements are printed through `tracing`; set RUST_LOG=sqlbuild=debug to see
//! them, and SQLBUILD_MAX_SQL_LENGTH=0 to disable truncation.

use std::cell::Cell;

use sqlbuild::{
    Context, ContextConfig, ExecResult, Executor, OrmResult, Record, Row, Value, args, columns,
};
use tracing_subscriber::EnvFilter;

/// Stand-in driver that echoes statements and fabricates results.
struct EchoDriver {
    next_id: Cell<i64>,
}

impl Executor for EchoDriver {
    fn execute(&self, sql: &str, args: &[Value]) -> OrmResult<ExecResult> {
        println!("  execute: {sql}  {args:?}");
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        Ok(ExecResult::new(1, id))
    }

    fn query(&self, sql: &str, args: &[Value]) -> OrmResult<Vec<Row>> {
        println!("  query:   {sql}  {args:?}");
        Ok(vec![
            Row::new()
                .with("id", "1")
                .with("username", "alice")
                .with("COUNT", "1"),
        ])
    }
}

#[derive(Debug, Record)]
struct NewUser {
    username: String,
    #[orm(column = "email_address")]
    email: Option<String>,
    age: i32,
}

fn main() -> OrmResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sqlbuild=debug")),
        )
        .init();

    let config = ContextConfig::from_env().debug(true);
    let ctx = Context::new(EchoDriver {
        next_id: Cell::new(0),
    })
    .with_config(config);

    // ============================================
    // Insert a record (age = 0 is left out)
    // ============================================
    println!("=== Insert ===");
    let user = NewUser {
        username: "alice".into(),
        email: Some("alice@example.com".into()),
        age: 0,
    };
    let id = ctx
        .create_command()
        .table("users")
        .insert(&user)
        .execute(&ctx)?;
    println!("  last insert id: {id}");

    // ============================================
    // Update from an ordered column list
    // ============================================
    println!("=== Update ===");
    let n = sqlbuild::update("users")
        .update(&columns! { "age" => 31, "nickname" => "" }, "id = ?", args![id])
        .execute(&ctx)?;
    println!("  rows affected: {n}");

    // ============================================
    // Query
    // ============================================
    println!("=== Select ===");
    let rows = ctx
        .create_query()
        .from("users u")
        .select("u.id, u.username")
        .left_join("orders o", "o.user_id = u.id")
        .where_("u.age > ?", args![18])
        .or_where("u.username = ?", args!["alice"])
        .order_by("u.id DESC")
        .paginate(1, 20)
        .all(&ctx)?;
    for row in &rows {
        println!("  {} -> {}", row.value("id").as_int(), row.value("username").to_string_lossy());
    }

    let total = ctx.create_query().from("users").count(&ctx);
    println!("  total users: {total}");

    // ============================================
    // Delete
    // ============================================
    println!("=== Delete ===");
    sqlbuild::delete_from("users")
        .delete("id = ?", args![id])
        .execute(&ctx)?;
    println!("  affected rows: {}", ctx.affected_rows());

    Ok(())
}
