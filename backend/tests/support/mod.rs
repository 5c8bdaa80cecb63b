//! Shared helpers for the Diesel integration suites.
//!
//! Each suite boots an embedded cluster through [`pg_embed::test_cluster`],
//! creates a fresh database and applies the crate's embedded migrations to
//! it before handing out adapters.

pub mod pg_embed;

use postgres::{Client, NoTls};

/// Render a `postgres` error with its SQLSTATE and detail when available.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Create `name` on the cluster reachable through `admin_url`.
pub fn create_database(admin_url: &str, name: &str) -> Result<(), String> {
    let mut client =
        Client::connect(admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let escaped = name.replace('"', "\"\"");
    client
        .batch_execute(format!(r#"CREATE DATABASE "{escaped}""#).as_str())
        .map_err(|err| format_postgres_error(&err))
}

/// Count rows in `table` belonging to `shopping_list_id`.
pub fn count_rows_for_list(url: &str, table: &str, shopping_list_id: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let sql = format!("SELECT COUNT(*) FROM {table} WHERE shopping_list_id = $1");
    let row = client
        .query_one(sql.as_str(), &[&shopping_list_id])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get::<_, i64>(0))
}

/// True when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when `SKIP_TEST_CLUSTER` is set, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
