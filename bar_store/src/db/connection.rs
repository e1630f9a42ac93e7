//! SQLite connection helpers.
//!
//! Provides [`connect_sqlite`] that opens a connection and applies
//! recommended PRAGMAs: WAL journaling and a 5000ms busy_timeout. Parent
//! directories of the database file are created on first connection.

use std::path::Path;

use diesel::{Connection, RunQueryDsl, SqliteConnection, sql_query};

use crate::error::StoreResult;

/// Open a SQLite connection and apply connection-wide PRAGMAs.
pub fn connect_sqlite(db_path: &Path) -> StoreResult<SqliteConnection> {
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let database_url = db_path.to_string_lossy();
    let mut conn = SqliteConnection::establish(&database_url)?;

    // Better read concurrency while the single writer holds the store lock
    sql_query("PRAGMA journal_mode=WAL;").execute(&mut conn)?;
    sql_query("PRAGMA busy_timeout=5000;").execute(&mut conn)?;
    Ok(conn)
}
