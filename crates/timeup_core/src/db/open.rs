//! Connection bootstrap for the key-value database.
//!
//! Every connection handed out here is migrated and ready for
//! `SqliteKeyValueStore::try_new`.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the database file, creating it when absent, and migrates it.
///
/// Emits one `db_open` event with the outcome and duration.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_logged("file", || Connection::open(path))
}

/// Opens a migrated in-memory database. Nothing survives the connection.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_logged("memory", Connection::open_in_memory)
}

fn open_logged(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = match connect() {
        Ok(mut conn) => prepare(&mut conn)
            .map(|()| conn)
            .map_err(|err| (err, "db_bootstrap_failed")),
        Err(err) => Err((DbError::from(err), "db_open_failed")),
    };
    let duration_ms = started_at.elapsed().as_millis();

    match result {
        Ok(conn) => {
            info!("event=db_open module=db status=ok mode={mode} duration_ms={duration_ms}");
            Ok(conn)
        }
        Err((err, code)) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={duration_ms} error_code={code} error={err}"
            );
            Err(err)
        }
    }
}

fn prepare(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
