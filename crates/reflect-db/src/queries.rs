use crate::error::DbError;
use crate::models::{EntryRow, UserRow};
use crate::{Database, Result};
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Users --

    pub fn insert_user(&self, username: &str, password_hash: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
                (username, password_hash),
            )
            .map_err(DbError::from_insert)?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    pub fn has_users(&self) -> Result<bool> {
        self.with_conn(|conn| {
            let found = conn
                .query_row("SELECT 1 FROM users LIMIT 1", [], |_| Ok(()))
                .optional()?;
            Ok(found.is_some())
        })
    }

    // -- Entries --

    /// Insert one entry inside its own transaction and return the assigned id.
    pub fn insert_entry(&self, body: &str, timestamp: &str) -> Result<i64> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO entries (body, timestamp) VALUES (?1, ?2)",
                (body, timestamp),
            )
            .map_err(DbError::from_insert)?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })
    }

    /// All entries, oldest first.
    pub fn get_entries(&self) -> Result<Vec<EntryRow>> {
        self.with_conn(query_entries)
    }

    pub fn count_entries(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |r| r.get(0))?;
            Ok(count as u64)
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare("SELECT username, password_hash FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                username: row.get(0)?,
                password_hash: row.get(1)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_entries(conn: &Connection) -> Result<Vec<EntryRow>> {
    let mut stmt = conn.prepare("SELECT id, body, timestamp FROM entries ORDER BY id ASC")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(EntryRow {
                id: row.get(0)?,
                body: row.get(1)?,
                timestamp: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
