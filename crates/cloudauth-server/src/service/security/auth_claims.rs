use std::borrow::Cow;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// Claims carried by every access token.
///
/// Timestamps are encoded as whole seconds since the Unix epoch so the
/// token stays interoperable with any standard JWT tooling.
#[derive(Debug, Clone, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct AuthClaims {
    /// Issuer (who created the token).
    #[serde(rename = "iss")]
    issued_by: Cow<'static, str>,
    /// Subject (the authenticated username).
    #[serde(rename = "sub")]
    pub subject: String,

    /// Issued at.
    #[serde(rename = "iat", with = "jiff::fmt::serde::timestamp::second::required")]
    pub issued_at: Timestamp,
    /// Expiration time.
    #[serde(rename = "exp", with = "jiff::fmt::serde::timestamp::second::required")]
    pub expires_at: Timestamp,
}

impl AuthClaims {
    /// Issuer identifier stamped into, and required from, every token.
    pub const JWT_ISSUER: &str = "cloudauth";

    /// Creates claims for `subject` valid from `issued_at` for `lifetime`.
    ///
    /// Returns `None` if the expiry would overflow the timestamp range.
    pub fn new(
        subject: impl Into<String>,
        issued_at: Timestamp,
        lifetime: SignedDuration,
    ) -> Option<Self> {
        let expires_at = issued_at.checked_add(lifetime).ok()?;

        Some(Self {
            issued_by: Cow::Borrowed(Self::JWT_ISSUER),
            subject: subject.into(),
            issued_at,
            expires_at,
        })
    }

    /// Returns the issuer claim.
    #[inline]
    pub fn issuer(&self) -> &str {
        &self.issued_by
    }

    /// Whether the token is past its expiry at `now`.
    ///
    /// Compared at second precision. A token is still valid at the exact
    /// second of its expiry.
    #[inline]
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now.as_second() > self.expires_at.as_second()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(second: i64) -> Timestamp {
        Timestamp::from_second(second).unwrap()
    }

    #[test]
    fn claims_expire_after_lifetime() {
        let claims = AuthClaims::new("alice", at(1_000), SignedDuration::from_secs(3600)).unwrap();

        assert_eq!(claims.issuer(), AuthClaims::JWT_ISSUER);
        assert_eq!(claims.expires_at, at(4_600));
        assert!(!claims.is_expired_at(at(4_599)));
        assert!(!claims.is_expired_at(at(4_600)));
        assert!(claims.is_expired_at(at(4_601)));
    }

    #[test]
    fn claims_serialize_as_numeric_seconds() -> anyhow::Result<()> {
        let claims = AuthClaims::new("alice", at(1_000), SignedDuration::from_secs(60)).unwrap();
        let value = serde_json::to_value(&claims)?;

        assert_eq!(value["iss"], "cloudauth");
        assert_eq!(value["sub"], "alice");
        assert_eq!(value["iat"], 1_000);
        assert_eq!(value["exp"], 1_060);
        Ok(())
    }
}
