//! Embedded schema migrations.

use anyhow::anyhow;
use diesel::{Connection, SqliteConnection, connection::SimpleConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Embedded Diesel migrations bundled with this crate.
///
/// Applied by [`run_sqlite`] to bring the database schema up to date.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Runs pending Diesel migrations on the SQLite database at the given URL.
///
/// Sets the journal mode to WAL and applies all embedded migrations,
/// returning an error on failure.
pub fn run_sqlite(database_url: &str) -> anyhow::Result<()> {
    let mut conn = SqliteConnection::establish(database_url)?;
    conn.batch_execute("PRAGMA journal_mode=WAL;")?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!(e))?;

    Ok(())
}
