use argon2::password_hash::SaltString;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
};
use rand_core::OsRng;

use crate::error::HashError;

/// Argon2id cost parameters. Fixed at build time; stored hashes carry their
/// own copy so raising the cost never invalidates existing accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl HashCost {
    pub const DEFAULT: Self = Self {
        memory_kib: Params::DEFAULT_M_COST,
        iterations: Params::DEFAULT_T_COST,
        parallelism: Params::DEFAULT_P_COST,
    };

    fn params(&self) -> Result<Params, HashError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| HashError(e.to_string()))
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Salted one-way password hashing.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: HashCost,
}

impl PasswordHasher {
    /// Rejects a cost Argon2 cannot run with.
    pub fn new(cost: HashCost) -> Result<Self, HashError> {
        cost.params()?;
        Ok(Self { cost })
    }

    pub fn cost(&self) -> HashCost {
        self.cost
    }

    /// Hash `password` into a self-describing PHC string with a fresh salt.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.cost.params()?);
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HashError(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Check `password` against a stored hash using the salt and cost the
    /// hash carries. Malformed or foreign hashes never match.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: HashCost::DEFAULT,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const CHEAP: HashCost = HashCost {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    };

    pub(crate) fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::new(CHEAP).unwrap()
    }

    #[test]
    fn hash_verifies_against_its_password() {
        let hasher = cheap_hasher();
        for password in ["pw1", "", "correct horse battery staple", "pässwörd ✓"] {
            let hash = hasher.hash(password).unwrap();
            assert!(hasher.verify(password, &hash), "failed for {password:?}");
        }
    }

    #[test]
    fn same_password_hashes_differently() {
        let hasher = cheap_hasher();
        let first = hasher.hash("secret").unwrap();
        let second = hasher.hash("secret").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret", &first));
        assert!(hasher.verify("secret", &second));
    }

    #[test]
    fn wrong_password_fails() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("secret").unwrap();
        assert!(!hasher.verify("Secret", &hash));
        assert!(!hasher.verify("", &hash));
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        let hasher = cheap_hasher();
        assert!(!hasher.verify("secret", ""));
        assert!(!hasher.verify("secret", "not-a-hash"));
        assert!(!hasher.verify("secret", "$argon2id$v=19$m=64,t=1,p=1$truncated"));
        // bcrypt output from older installs is not accepted
        assert!(!hasher.verify(
            "secret",
            "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy"
        ));
    }

    #[test]
    fn verify_uses_cost_embedded_in_hash() {
        let hash = cheap_hasher().hash("secret").unwrap();
        assert!(PasswordHasher::default().verify("secret", &hash));
    }

    #[test]
    fn default_cost_is_argon2id_with_fixed_params() {
        let hash = PasswordHasher::default().hash("secret").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"), "{hash}");
        assert_eq!(HashCost::default(), HashCost::DEFAULT);
    }

    #[test]
    fn default_hasher_uses_the_default_cost() {
        let hasher = PasswordHasher::default();
        assert_eq!(hasher.cost(), HashCost::DEFAULT);
        assert_eq!(
            HashCost::DEFAULT,
            HashCost {
                memory_kib: 19_456,
                iterations: 2,
                parallelism: 1,
            }
        );
        assert_eq!(cheap_hasher().cost(), CHEAP);
    }

    #[test]
    fn invalid_cost_is_rejected() {
        let cost = HashCost {
            memory_kib: 64,
            iterations: 0,
            parallelism: 1,
        };
        assert!(PasswordHasher::new(cost).is_err());
    }
}
