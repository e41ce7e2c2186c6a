//! Password hashing and verification using Argon2id.
//!
//! Hashes are produced in PHC string format, so the algorithm, parameters and
//! salt travel with the stored value and no extra columns are needed.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
};
use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::utility::tracing_targets::PASSWORD_HASHER as TRACING_TARGET;
use crate::{Error, Result};

/// Salted, deliberately slow password hashing service.
///
/// Every call to [`hash_password`] generates a fresh random salt, so hashing
/// the same password twice yields two different strings that both verify.
///
/// [`hash_password`]: PasswordHasher::hash_password
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    /// Hash of a random password, verified against on unknown-user logins.
    dummy_hash: Arc<str>,
}

impl PasswordHasher {
    /// Creates a hasher with OWASP recommended Argon2id parameters.
    ///
    /// - Memory cost: 19456 KiB (about 19 MB)
    /// - Time cost: 2 iterations
    /// - Parallelism: 1 lane
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the parameter set is rejected.
    pub fn new() -> Result<Self> {
        let params = Params::new(
            19456, // memory cost in KiB
            2,     // iterations
            1,     // lanes
            None,  // default output length (32 bytes)
        )
        .map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to create argon2 parameters",
            );

            Error::config("invalid password hashing configuration")
        })?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_hash = Self::hash_with(&argon2, &Self::random_password())?;

        Ok(Self {
            argon2,
            dummy_hash: dummy_hash.into(),
        })
    }

    fn random_password() -> String {
        let mut rng = rand::thread_rng();
        let password_len = rng.gen_range(16..32);
        (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(password_len)
            .map(char::from)
            .collect()
    }

    fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing operation failed",
                );

                Error::internal("hasher", "password hashing failed")
            })?;

        Ok(password_hash.to_string())
    }

    /// Hashes a password with a freshly generated random salt.
    ///
    /// The returned PHC string is safe to persist as-is. The password itself
    /// is never logged.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the hashing primitive fails.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        Self::hash_with(&self.argon2, password)
    }

    /// Checks a plaintext password against a stored PHC hash.
    ///
    /// Returns `false` on mismatch and also when the stored hash cannot be
    /// parsed; a corrupted record never authenticates.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(parsed_hash) => parsed_hash,
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "stored password hash is malformed",
                );
                return false;
            }
        };

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => {
                tracing::debug!(target: TRACING_TARGET, "password verification succeeded");
                true
            }
            Err(ArgonError::Password) => {
                tracing::debug!(target: TRACING_TARGET, "password verification failed");
                false
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password verification system error",
                );
                false
            }
        }
    }

    /// Runs one verification against a throwaway hash made at construction.
    ///
    /// Used on the unknown-user login path so it costs the same single
    /// Argon2 run as a wrong password. Always returns `false`.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        let _ = self.verify_password(password, &self.dummy_hash);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new()?;
        let hash = hasher.hash_password("pw1")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("pw1", &hash));
        assert!(!hasher.verify_password("wrong", &hash));

        Ok(())
    }

    #[test]
    fn hash_produces_unique_salts() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new()?;

        let hash1 = hasher.hash_password("test_password")?;
        let hash2 = hasher.hash_password("test_password")?;

        assert_ne!(hash1, hash2);
        assert!(hasher.verify_password("test_password", &hash1));
        assert!(hasher.verify_password("test_password", &hash2));

        Ok(())
    }

    #[test]
    fn hash_never_contains_plaintext() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new()?;
        let hash = hasher.hash_password("plaintext-marker")?;

        assert!(!hash.contains("plaintext-marker"));
        Ok(())
    }

    #[test]
    fn malformed_hash_does_not_verify() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new()?;

        assert!(!hasher.verify_password("test_password", "invalid_hash_format"));
        assert!(!hasher.verify_password("test_password", ""));
        Ok(())
    }

    #[test]
    fn dummy_verification_always_fails() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new()?;

        assert!(!hasher.verify_dummy_password("anything"));
        assert!(!hasher.verify_dummy_password(""));
        Ok(())
    }

    #[test]
    fn dummy_hash_matches_live_cost() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new()?;
        let real_hash = hasher.hash_password("test_password")?;

        let dummy = PasswordHash::new(&hasher.dummy_hash)?;
        let real = PasswordHash::new(&real_hash)?;

        assert_eq!(dummy.algorithm, real.algorithm);
        assert_eq!(dummy.version, real.version);
        assert_eq!(dummy.params, real.params);
        Ok(())
    }

    #[test]
    fn dummy_hash_is_made_once() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new()?;
        let cloned = hasher.clone();
        let before = hasher.dummy_hash.clone();

        assert!(!hasher.verify_dummy_password("anything"));
        assert!(Arc::ptr_eq(&before, &hasher.dummy_hash));
        assert!(Arc::ptr_eq(&before, &cloned.dummy_hash));
        Ok(())
    }
}
