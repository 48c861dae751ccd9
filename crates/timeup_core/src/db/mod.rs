//! SQLite backing for the durable key-value store.
//!
//! One connection holds every collection in the `kv_entries` table. The
//! schema version lives in `PRAGMA user_version`, and a store may only be
//! built on a connection whose version equals [`migrations::latest_version`].

use rusqlite::Connection;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or checking the key-value database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// The connection has not been migrated yet.
    SchemaOutdated { found: u32, expected: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "key-value schema version {found} is newer than supported {supported}"
            ),
            Self::SchemaOutdated { found, expected } => write!(
                f,
                "key-value schema version {found} is behind {expected}; open the database with `open_db` to migrate it"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::SchemaOutdated { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Fails unless the connection is exactly at the latest schema version.
pub fn ensure_current_schema(conn: &Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let latest = migrations::latest_version();
    match found.cmp(&latest) {
        Ordering::Equal => Ok(()),
        Ordering::Greater => Err(DbError::SchemaTooNew {
            found,
            supported: latest,
        }),
        Ordering::Less => Err(DbError::SchemaOutdated {
            found,
            expected: latest,
        }),
    }
}
