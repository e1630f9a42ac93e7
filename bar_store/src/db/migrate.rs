//! Embedded schema migrations.

use std::path::Path;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::db::connection::connect_sqlite;
use crate::error::{StoreError, StoreResult};

/// Embedded Diesel migrations bundled with this crate.
///
/// Applied by [`run_sqlite`] to bring the database schema up to date.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Runs pending migrations on the SQLite database at `db_path`, creating
/// the file (and its parent directories) when absent.
pub fn run_sqlite(db_path: &Path) -> StoreResult<()> {
    let mut conn = connect_sqlite(db_path)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Migration(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod test {
    use diesel::RunQueryDsl;
    use diesel::connection::SimpleConnection;

    use super::*;

    #[test]
    fn migrations_apply_on_temp_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("migrate_test.db");

        run_sqlite(&path).expect("migration run");

        let mut conn = connect_sqlite(&path).unwrap();
        conn.batch_execute("INSERT INTO kv_state (key, value, updated_at) VALUES ('hello', 'world', 0)")
            .unwrap();
    }

    #[test]
    fn migrations_are_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("migrate_twice.db");

        run_sqlite(&path).expect("first run");
        run_sqlite(&path).expect("second run");

        let mut conn = connect_sqlite(&path).unwrap();
        let n: i64 = diesel::sql_query("SELECT COUNT(*) AS count FROM bars_1m")
            .get_result::<CountRow>(&mut conn)
            .unwrap()
            .count;
        assert_eq!(n, 0);
    }

    #[derive(diesel::QueryableByName)]
    struct CountRow {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        count: i64,
    }
}
