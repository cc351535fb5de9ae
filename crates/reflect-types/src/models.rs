use chrono::{DateTime, Utc};

/// Store-assigned entry identifier. Strictly increasing, never reused.
pub type EntryId = i64;

/// One immutable journal post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl Entry {
    pub fn new(id: EntryId, body: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            body: body.into(),
            timestamp,
        }
    }
}

/// A registered account. The password hash never leaves the credential
/// store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
