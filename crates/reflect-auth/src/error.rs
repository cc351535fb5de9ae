use reflect_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct HashError(pub String);

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Error creating users table: {0}")]
    Schema(#[source] DbError),

    #[error("Username already registered: {0}")]
    AlreadyExists(String),

    #[error("Credential store failure: {0}")]
    Persist(#[from] DbError),

    #[error(transparent)]
    Hash(#[from] HashError),
}
