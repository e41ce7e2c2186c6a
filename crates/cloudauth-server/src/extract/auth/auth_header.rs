//! Bearer token extraction from the `Authorization` header.
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn handler(auth_header: AuthHeader) -> String {
//!     format!("hello {}", auth_header.subject())
//! }
//! ```

use axum::extract::{FromRef, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::handler::{Error, ErrorKind};
use crate::service::{AuthClaims, TokenIssuer};
use crate::utility::tracing_targets::AUTHENTICATION as TRACING_TARGET;

/// Scheme prefix of a bearer `Authorization` header, including the space.
const BEARER_PREFIX: &str = "Bearer ";

/// Validated bearer token claims of the current request.
///
/// Extraction reads the `Authorization` header, checks its shape, validates
/// the token and caches the result in the request extensions, so several
/// extractors in one request validate only once.
#[must_use]
#[derive(Debug, Clone)]
pub struct AuthHeader {
    auth_claims: AuthClaims,
}

impl AuthHeader {
    /// Wraps already validated claims.
    #[inline]
    pub const fn new(auth_claims: AuthClaims) -> Self {
        Self { auth_claims }
    }

    /// Username the token was issued for.
    #[inline]
    pub fn subject(&self) -> &str {
        &self.auth_claims.subject
    }
}

/// Returns the token of an exactly `Bearer <token>` shaped header.
///
/// The header must start with `"Bearer "`, the remainder must be non-empty
/// and must not contain a second `"Bearer "`. Anything else yields `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?;

    if token.is_empty() || token.contains(BEARER_PREFIX) {
        return None;
    }

    Some(token)
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Sync + Send,
    TokenIssuer: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.extensions.get::<Self>() {
            return Ok(auth_header.clone());
        }

        let Some(token) = bearer_token(&parts.headers) else {
            tracing::debug!(
                target: TRACING_TARGET,
                present = parts.headers.contains_key(AUTHORIZATION),
                "missing or misshapen bearer header",
            );

            return Err(ErrorKind::MissingAuthToken
                .with_context("authorization header must be exactly `Bearer <token>`"));
        };

        let token_issuer = TokenIssuer::from_ref(state);
        let auth_claims = token_issuer.validate(token).map_err(|e| {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %e,
                "bearer token rejected",
            );
            Error::from(e)
        })?;

        let auth_header = Self::new(auth_claims);
        parts.extensions.insert(auth_header.clone());
        Ok(auth_header)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn accepts_exact_bearer_shape() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_other_shapes() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&headers("bearer abc")), None);
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("abc")), None);
        assert_eq!(bearer_token(&headers("Bearer abc Bearer def")), None);
        assert_eq!(bearer_token(&headers("Token Bearer abc")), None);
    }
}
