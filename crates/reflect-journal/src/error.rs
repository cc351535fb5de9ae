use reflect_db::DbError;
use reflect_types::timestamp::TimestampError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Error creating entries table: {0}")]
    Schema(#[source] DbError),

    #[error("Failed to persist entry: {0}")]
    Persist(#[from] DbError),

    #[error("Corrupt entry {id}: {source}")]
    CorruptEntry {
        id: i64,
        #[source]
        source: TimestampError,
    },
}
