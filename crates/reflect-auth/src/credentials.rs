use std::sync::Arc;

use reflect_db::{Database, DbError};
use reflect_types::models::User;
use tracing::{debug, error, info, warn};

use crate::error::CredentialError;
use crate::hasher::PasswordHasher;

/// Verified against when a username is unknown, so a miss costs the same as
/// a wrong password.
const DUMMY_PASSWORD: &str = "reflect-unknown-user";

/// Username → password-hash registry gating access to the journal.
pub struct CredentialStore {
    db: Arc<Database>,
    hasher: PasswordHasher,
    dummy_hash: Option<String>,
}

impl CredentialStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_hasher(db, PasswordHasher::default())
    }

    /// Builds the dummy hash up front so the first unknown-user login pays
    /// only for a verify, like every later one.
    pub fn with_hasher(db: Arc<Database>, hasher: PasswordHasher) -> Self {
        let dummy_hash = match hasher.hash(DUMMY_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                error!("Error building dummy hash, unknown users will fail fast: {}", e);
                None
            }
        };

        Self {
            db,
            hasher,
            dummy_hash,
        }
    }

    /// Create the users table if absent. Safe to call on every startup; a
    /// failure is logged and only matters if the table never existed.
    pub fn ensure_schema(&self) -> Result<(), CredentialError> {
        self.db.ensure_users_table().map_err(|e| {
            error!("Error creating users table: {}", e);
            CredentialError::Schema(e)
        })
    }

    /// True once any account has been registered.
    pub fn exists(&self) -> bool {
        match self.db.has_users() {
            Ok(found) => found,
            Err(e) => {
                error!("Error checking for registered users: {}", e);
                false
            }
        }
    }

    /// Register `username` with a freshly salted hash of `password`.
    ///
    /// Input is taken as-is: trimming and rejecting blank fields is the
    /// caller's job.
    pub fn register(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        match self.db.get_user_by_username(username) {
            Ok(Some(_)) => {
                warn!("Registration rejected, username already taken: {}", username);
                return Err(CredentialError::AlreadyExists(username.to_string()));
            }
            Ok(None) => {}
            Err(e) => {
                error!("Error looking up user {}: {}", username, e);
                return Err(CredentialError::Persist(e));
            }
        }

        let password_hash = self.hasher.hash(password).map_err(|e| {
            error!("Error hashing password for {}: {}", username, e);
            e
        })?;

        match self.db.insert_user(username, &password_hash) {
            Ok(()) => {
                info!("Registered user {}", username);
                Ok(())
            }
            Err(DbError::UniqueViolation(_)) => {
                warn!("Registration rejected, username already taken: {}", username);
                Err(CredentialError::AlreadyExists(username.to_string()))
            }
            Err(e) => {
                error!("Error saving user {}: {}", username, e);
                Err(CredentialError::Persist(e))
            }
        }
    }

    /// Check a login attempt. Unknown user, wrong password, and storage
    /// errors all come back as `false`.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        let user = match self.db.get_user_by_username(username) {
            Ok(user) => user,
            Err(e) => {
                error!("Error looking up user {}: {}", username, e);
                None
            }
        };

        match user {
            Some(row) => {
                let ok = self.hasher.verify(password, &row.password_hash);
                debug!("Login attempt for {}: {}", username, if ok { "ok" } else { "rejected" });
                ok
            }
            None => {
                if let Some(dummy) = &self.dummy_hash {
                    let _ = self.hasher.verify(password, dummy);
                }
                debug!("Login attempt for {}: rejected", username);
                false
            }
        }
    }

    /// The account registered under `username`, if any. Lookup errors are
    /// logged and read as "no such user".
    pub fn find_user(&self, username: &str) -> Option<User> {
        match self.db.get_user_by_username(username) {
            Ok(row) => row.map(|row| User::new(row.username)),
            Err(e) => {
                error!("Error looking up user {}: {}", username, e);
                None
            }
        }
    }
}
