//! Database location, connections, and schema migrations.
//!
//! - [`resolve_db_path`] picks the SQLite file from the `ALERT_DB_PATH`
//!   environment override, defaulting to `alert.db` in the working
//!   directory.
//! - [`connection::connect_sqlite`] opens a tuned connection (WAL,
//!   busy_timeout) and creates parent directories on first use.
//! - [`migrate::run_sqlite`] applies the embedded Diesel migrations.

use std::path::PathBuf;

pub mod connection;
pub mod migrate;

/// Environment variable overriding the SQLite database location.
pub const DB_PATH_ENV: &str = "ALERT_DB_PATH";

// Relative path, resolved against the process working directory.
// Deployments that need a fixed location pin it via ALERT_DB_PATH.
const DEFAULT_DB_FILENAME: &str = "alert.db";

/// Resolve the database path from [`DB_PATH_ENV`], falling back to
/// `alert.db` in the current working directory.
pub fn resolve_db_path() -> PathBuf {
    PathBuf::from(shared_utils::env::env_var_or(DB_PATH_ENV, DEFAULT_DB_FILENAME))
}
