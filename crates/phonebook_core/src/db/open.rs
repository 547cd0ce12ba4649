//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection settings required by the contact store.
//! - Run the schema step before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have a 5 second busy timeout.
//! - Returned connections are at the requested schema version.

use super::schema::{apply_schema, SchemaAction, SCHEMA_VERSION};
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file at the current schema version.
///
/// # Side effects
/// - Creates the file and the `contacts` table when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_db_with_version(path, SCHEMA_VERSION)
}

/// Opens a SQLite database file at an explicit schema version.
///
/// A file written by an older version is dropped and recreated; a file
/// written by a newer version is rejected.
pub fn open_db_with_version(path: impl AsRef<Path>, version: u32) -> DbResult<Connection> {
    open_with("file", version, || Connection::open(path))
}

/// Opens an in-memory SQLite database at the current schema version.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", SCHEMA_VERSION, Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    version: u32,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode} version={version}");

    let mut conn = connect().map_err(|err| {
        error!(
            "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
            mode,
            started_at.elapsed().as_millis(),
            err
        );
        err
    })?;

    match bootstrap_connection(&mut conn, version) {
        Ok(action) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={} schema={}",
                mode,
                started_at.elapsed().as_millis(),
                schema_action_label(action)
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, version: u32) -> DbResult<SchemaAction> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_schema(conn, version)
}

fn schema_action_label(action: SchemaAction) -> &'static str {
    match action {
        SchemaAction::Unchanged => "unchanged",
        SchemaAction::Created => "created",
        SchemaAction::Recreated { .. } => "recreated",
    }
}
