use std::path::PathBuf;

pub const USERS_DB_VAR: &str = "REFLECT_USERS_DB";
pub const ENTRIES_DB_VAR: &str = "REFLECT_ENTRIES_DB";

const DEFAULT_USERS_DB: &str = "users.db";
const DEFAULT_ENTRIES_DB: &str = "entries.db";

/// Where the two stores live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub users_db: PathBuf,
    pub entries_db: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = |key: &str, default: &str| -> PathBuf {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.into())
                .into()
        };

        Self {
            users_db: path(USERS_DB_VAR, DEFAULT_USERS_DB),
            entries_db: path(ENTRIES_DB_VAR, DEFAULT_ENTRIES_DB),
        }
    }

    /// Both stores pointed at one file.
    pub fn shared_file(&self) -> bool {
        self.users_db == self.entries_db
    }
}
