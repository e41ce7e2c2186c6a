//! Signed access-token issuance and validation.

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};

use super::{AuthClaims, SessionKeys};
use crate::utility::tracing_targets::SESSION_TOKEN as TRACING_TARGET;
use crate::{Error, Result};

/// Reasons a presented token is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TokenError {
    /// Malformed, wrongly signed, wrong algorithm or missing required claims.
    #[error("invalid token")]
    Invalid,
    /// Authentic, but the current time is past its expiry.
    #[error("token expired")]
    Expired,
}

impl From<JwtError> for TokenError {
    fn from(error: JwtError) -> Self {
        match error.kind() {
            JwtErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid,
        }
    }
}

/// Issues HS256 access tokens and validates presented ones.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    keys: SessionKeys,
    lifetime: SignedDuration,
}

impl TokenIssuer {
    /// Lifetime of every issued token.
    pub const TOKEN_LIFETIME: SignedDuration = SignedDuration::from_secs(60 * 60);

    /// Creates an issuer signing with `keys`.
    pub fn new(keys: SessionKeys) -> Self {
        Self {
            keys,
            lifetime: Self::TOKEN_LIFETIME,
        }
    }

    /// Issues a token for `username`, valid for one hour from now.
    pub fn issue(&self, username: &str) -> Result<String> {
        self.issue_at(username, Timestamp::now())
    }

    /// Issues a token for `username` as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if signing fails. No token is
    /// produced in that case.
    pub fn issue_at(&self, username: &str, now: Timestamp) -> Result<String> {
        let claims = AuthClaims::new(username, now, self.lifetime)
            .ok_or_else(|| Error::internal("token", "token expiry out of range"))?;

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            self.keys.encoding_key(),
        )
        .map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to sign access token",
            );

            Error::auth("access token signing failed").with_source(e)
        })?;

        tracing::debug!(
            target: TRACING_TARGET,
            subject = %claims.subject,
            expires_at = %claims.expires_at,
            "access token issued",
        );

        Ok(token)
    }

    /// Validates a presented token against the current time.
    pub fn validate(&self, token: &str) -> Result<AuthClaims, TokenError> {
        self.validate_at(token, Timestamp::now())
    }

    /// Validates a presented token as if the current time were `now`.
    ///
    /// The signature must verify under the configured secret using HS256
    /// only; any other algorithm named in the token header is refused. The
    /// issuer, subject and expiry claims must all be present.
    pub fn validate_at(&self, token: &str, now: Timestamp) -> Result<AuthClaims, TokenError> {
        let data = decode::<AuthClaims>(token, self.keys.decoding_key(), &Self::validation())
            .map_err(|e| {
                tracing::debug!(
                    target: TRACING_TARGET,
                    error = %e,
                    "access token rejected",
                );

                TokenError::from(e)
            })?;

        let claims = data.claims;
        if claims.is_expired_at(now) {
            tracing::debug!(
                target: TRACING_TARGET,
                subject = %claims.subject,
                expires_at = %claims.expires_at,
                "access token expired",
            );

            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `validate_at`.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_issuer(&[AuthClaims::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "sub", "exp"]);
        validation
    }
}
