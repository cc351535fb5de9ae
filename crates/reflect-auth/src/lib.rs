//! Reflect credential gate.
//!
//! One account guards the journal. Passwords are stored only as Argon2id
//! PHC strings; a lookup miss and a wrong password look the same to callers.

pub mod credentials;
pub mod error;
pub mod hasher;

pub use credentials::CredentialStore;
pub use error::{CredentialError, HashError};
pub use hasher::{HashCost, PasswordHasher};
