//! Credential hashing, signing keys and access tokens.

mod auth_claims;
mod password_hasher;
mod session_keys;
mod token_issuer;

pub use auth_claims::AuthClaims;
pub use password_hasher::PasswordHasher;
pub use session_keys::SessionKeys;
pub use token_issuer::{TokenError, TokenIssuer};
