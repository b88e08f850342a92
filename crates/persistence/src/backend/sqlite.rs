// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening and configuring `SQLite` connections.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Schema migrations, including the default shop hours seed.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Journal mode applied when a connection opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    /// `SQLite`'s rollback journal. In-memory databases use this.
    Rollback,
    /// Write-ahead log, so readers of a file database do not block the writer.
    WriteAhead,
}

impl JournalMode {
    const fn pragma(self) -> Option<&'static str> {
        match self {
            Self::Rollback => None,
            Self::WriteAhead => Some("PRAGMA journal_mode = WAL"),
        }
    }
}

#[derive(QueryableByName)]
struct PragmaFlag {
    #[diesel(sql_type = Integer, column_name = foreign_keys)]
    enabled: i32,
}

/// Opens `url`, applies connection pragmas and pending migrations, and
/// confirms foreign keys are enforced.
///
/// # Errors
///
/// Returns `Open` if the connection or a pragma fails, `Migration` if the
/// schema cannot be brought up to date, and `ForeignKeysDisabled` if the
/// driver ignored the foreign key pragma.
pub fn open(url: &str, journal: JournalMode) -> Result<SqliteConnection, PersistenceError> {
    let open_error = |reason: String| PersistenceError::Open {
        url: String::from(url),
        reason,
    };

    let mut conn: SqliteConnection =
        SqliteConnection::establish(url).map_err(|e| open_error(e.to_string()))?;

    // Foreign keys are per connection and off by default
    let pragmas = std::iter::once("PRAGMA foreign_keys = ON").chain(journal.pragma());
    for pragma in pragmas {
        diesel::sql_query(pragma)
            .execute(&mut conn)
            .map_err(|e| open_error(e.to_string()))?;
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::Migration(e.to_string()))?
        .len();
    debug!(applied, "Applied pending migrations");

    ensure_foreign_keys(&mut conn)?;
    info!(url, ?journal, "Opened SQLite database");
    Ok(conn)
}

/// Fails unless the connection enforces foreign keys.
///
/// # Errors
///
/// Returns `ForeignKeysDisabled` if enforcement is off, or a database
/// error if the pragma cannot be read.
pub fn ensure_foreign_keys(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let flag: PragmaFlag = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if flag.enabled == 0 {
        return Err(PersistenceError::ForeignKeysDisabled);
    }
    Ok(())
}

/// Rowid assigned by the most recent `INSERT` on this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
