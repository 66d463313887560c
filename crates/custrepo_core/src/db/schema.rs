//! `customers` table definition.
//!
//! The table is normally provisioned outside this crate; `ensure_schema` only
//! exists for fresh local databases and tests. No version tracking is done.

use rusqlite::Connection;

pub const CUSTOMERS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS customers (
    customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    registration_date TEXT NOT NULL DEFAULT (datetime('now'))
);";

/// Creates the `customers` table when it does not exist yet.
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CUSTOMERS_TABLE_SQL)
}
