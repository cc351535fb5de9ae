/// Database row types — these map directly to SQLite rows.
/// Distinct from reflect-types models to keep the DB layer independent.

pub struct UserRow {
    pub username: String,
    pub password_hash: String,
}

pub struct EntryRow {
    pub id: i64,
    pub body: String,
    pub timestamp: String,
}
