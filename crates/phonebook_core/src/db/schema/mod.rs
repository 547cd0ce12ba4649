//! Contacts table schema and version policy.
//!
//! # Responsibility
//! - Create the `contacts` table on a fresh database.
//! - Handle version bumps with the drop-and-recreate policy.
//!
//! # Invariants
//! - Applied version is mirrored to `PRAGMA user_version`.
//! - An upgrade discards every stored contact. This is intentional
//!   compatibility behavior and is logged at `warn`.
//! - Downgrades are refused with `DbError::UnsupportedSchemaVersion`.
//! - Target versions start at 1; version 0 means "no schema yet".

use crate::db::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the single application table.
pub const CONTACTS_TABLE: &str = "contacts";

const CREATE_SQL: &str = include_str!("contacts.sql");

/// What the schema step did to reach the target version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaAction {
    /// Database already at target version.
    Unchanged,
    /// Fresh database; table created.
    Created,
    /// Older database; table dropped and recreated.
    Recreated { from_version: u32, discarded_rows: u64 },
}

/// Returns the schema version this binary writes by default.
pub fn latest_version() -> u32 {
    SCHEMA_VERSION
}

/// Brings `conn` to `target_version` in a single transaction.
pub fn apply_schema(conn: &mut Connection, target_version: u32) -> DbResult<SchemaAction> {
    if target_version == 0 {
        return Err(DbError::InvalidSchemaVersion(target_version));
    }

    let current_version = current_user_version(conn)?;
    if current_version > target_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: target_version,
        });
    }

    if current_version == target_version {
        return Ok(SchemaAction::Unchanged);
    }

    let tx = conn.transaction()?;
    let action = if current_version == 0 {
        tx.execute_batch(CREATE_SQL)?;
        info!(
            "event=schema_create module=db status=ok version={}",
            target_version
        );
        SchemaAction::Created
    } else {
        let discarded_rows = count_rows(&tx)?;
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {CONTACTS_TABLE};"))?;
        tx.execute_batch(CREATE_SQL)?;
        warn!(
            "event=schema_upgrade module=db status=ok from_version={} to_version={} discarded_rows={}",
            current_version, target_version, discarded_rows
        );
        SchemaAction::Recreated {
            from_version: current_version,
            discarded_rows,
        }
    };
    tx.execute_batch(&format!("PRAGMA user_version = {target_version};"))?;
    tx.commit()?;

    Ok(action)
}

/// Reads the stored schema version.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn count_rows(conn: &Connection) -> DbResult<u64> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [CONTACTS_TABLE],
        |row| row.get(0),
    )?;
    if !exists {
        return Ok(0);
    }

    let rows: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {CONTACTS_TABLE};"),
        [],
        |row| row.get(0),
    )?;
    Ok(u64::try_from(rows).unwrap_or(0))
}
