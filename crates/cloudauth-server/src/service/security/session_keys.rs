//! Symmetric signing keys for access tokens.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::utility::tracing_targets::SESSION_KEYS as TRACING_TARGET;
use crate::{Error, Result};

/// HMAC keys derived from the configured shared secret.
///
/// Cloning is cheap; the key material lives behind an [`Arc`].
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
}

impl SessionKeys {
    /// Derives the encoding and decoding keys from a shared secret.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the secret is empty.
    pub fn from_secret(secret: impl AsRef<[u8]>) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            tracing::error!(target: TRACING_TARGET, "token signing secret is empty");
            return Err(Error::config("token signing secret must not be empty"));
        }

        let inner = Arc::new(SessionKeysInner {
            decoding_key: DecodingKey::from_secret(secret),
            encoding_key: EncodingKey::from_secret(secret),
        });

        tracing::debug!(
            target: TRACING_TARGET,
            secret_len = secret.len(),
            "token signing keys derived",
        );

        Ok(Self { inner })
    }

    /// Key used to verify token signatures.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Key used to sign tokens.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Signs and verifies a throwaway token to prove the keys are usable.
    pub fn validate_keys(&self) -> Result<()> {
        use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Clone, Serialize, Deserialize)]
        struct ProbeClaims {
            sub: String,
            exp: i64,
        }

        let claims = ProbeClaims {
            sub: "probe".to_owned(),
            exp: jiff::Timestamp::now().as_second() + 300,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, self.encoding_key())
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "key validation failed during encoding",
                );

                Error::auth("key validation encoding failed").with_source(e)
            })?;

        let validation = Validation::new(Algorithm::HS256);
        decode::<ProbeClaims>(&token, self.decoding_key(), &validation).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "key validation failed during decoding",
            );

            Error::auth("key validation decoding failed").with_source(e)
        })?;

        tracing::debug!(target: TRACING_TARGET, "key validation successful");
        Ok(())
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("decoding_key", &"[REDACTED]")
            .field("encoding_key", &"[REDACTED]")
            .finish()
    }
}
