// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection initialization.

use crate::error::PersistenceError;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_query;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::debug;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    foreign_keys: i32,
}

/// Opens a `SQLite` connection, enables foreign keys, and runs pending
/// migrations.
///
/// # Arguments
///
/// * `database_url` - The database URL or file path
///
/// # Errors
///
/// Returns an error if the connection cannot be established or a
/// migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    conn.batch_execute("PRAGMA foreign_keys = ON;")
        .map_err(|err| PersistenceError::InitializationError(err.to_string()))?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| PersistenceError::MigrationFailed(err.to_string()))?;

    debug!(database_url, "Initialized SQLite database");
    Ok(conn)
}

/// Enables WAL journaling for better read concurrency on file-backed
/// databases.
///
/// # Errors
///
/// Returns an error if the pragma cannot be applied.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    conn.batch_execute("PRAGMA journal_mode = WAL;")
        .map_err(|err| PersistenceError::InitializationError(err.to_string()))?;
    Ok(())
}

/// Verifies that foreign key enforcement is active.
///
/// This is a startup-time check: schema evolution may add referential
/// constraints, and they must be enforced from day one.
///
/// # Errors
///
/// Returns [`PersistenceError::ForeignKeyEnforcementNotEnabled`] if the
/// pragma reports enforcement off.
pub fn verify_foreign_key_enforcement(
    conn: &mut SqliteConnection,
) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma = sql_query("PRAGMA foreign_keys;")
        .get_result(conn)
        .map_err(|err| PersistenceError::InitializationError(err.to_string()))?;
    if pragma.foreign_keys != 1 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    Ok(())
}
