use std::sync::Arc;

use chrono::{DateTime, Utc};
use reflect_db::Database;
use reflect_types::models::{Entry, EntryId};
use reflect_types::timestamp;
use tracing::{debug, error, info};

use crate::error::JournalError;

/// Append-only log of journal entries.
///
/// `load_all` is a snapshot in id order; callers that append afterwards
/// either reload or push the returned id onto their own copy.
pub struct EntryStore {
    db: Arc<Database>,
}

impl EntryStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn ensure_schema(&self) -> Result<(), JournalError> {
        self.db.ensure_entries_table().map_err(|e| {
            error!("Error creating entries table: {}", e);
            JournalError::Schema(e)
        })
    }

    /// Every entry, oldest first.
    pub fn load_all(&self) -> Result<Vec<Entry>, JournalError> {
        let rows = self.db.get_entries().map_err(|e| {
            error!("Error loading entries: {}", e);
            JournalError::Persist(e)
        })?;

        let entries = rows
            .into_iter()
            .map(|row| {
                let ts = timestamp::decode(&row.timestamp).map_err(|source| {
                    error!("Entry {} has an unreadable timestamp: {}", row.id, source);
                    JournalError::CorruptEntry { id: row.id, source }
                })?;
                Ok(Entry::new(row.id, row.body, ts))
            })
            .collect::<Result<Vec<_>, JournalError>>()?;

        info!("Loaded {} entries", entries.len());
        Ok(entries)
    }

    /// Store a new entry and return its id. The row is written in a single
    /// transaction, so on error nothing was stored.
    pub fn append(&self, body: &str, timestamp: DateTime<Utc>) -> Result<EntryId, JournalError> {
        let encoded = timestamp::encode(&timestamp);
        let id = self.db.insert_entry(body, &encoded).map_err(|e| {
            error!("Error saving entry: {}", e);
            JournalError::Persist(e)
        })?;

        debug!("Saved entry {} at {}", id, encoded);
        Ok(id)
    }

    pub fn append_now(&self, body: &str) -> Result<Entry, JournalError> {
        let now = Utc::now();
        let id = self.append(body, now)?;
        Ok(Entry::new(id, body, now))
    }

    pub fn count(&self) -> Result<u64, JournalError> {
        self.db.count_entries().map_err(|e| {
            error!("Error counting entries: {}", e);
            JournalError::Persist(e)
        })
    }
}
