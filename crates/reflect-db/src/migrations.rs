use rusqlite::Connection;
use tracing::info;

use crate::{Database, Result};

impl Database {
    /// Create the credential registry if absent. Idempotent.
    pub fn ensure_users_table(&self) -> Result<()> {
        self.with_conn(create_users)
    }

    /// Create the entry log if absent. Idempotent.
    pub fn ensure_entries_table(&self) -> Result<()> {
        self.with_conn(create_entries)
    }
}

fn create_users(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            username        TEXT PRIMARY KEY,
            password_hash   TEXT NOT NULL
        );
        ",
    )?;

    info!("users table ready");
    Ok(())
}

fn create_entries(conn: &Connection) -> Result<()> {
    // AUTOINCREMENT so ids are never handed out twice, even after a row is
    // removed behind our back.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            body        TEXT NOT NULL,
            timestamp   TEXT NOT NULL
        );
        ",
    )?;

    info!("entries table ready");
    Ok(())
}
