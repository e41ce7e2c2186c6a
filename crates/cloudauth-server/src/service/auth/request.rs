//! Credential payloads accepted by the auth service.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for registration.
///
/// Missing fields deserialize as empty strings and are then rejected by
/// validation, so a partial body and an empty field fail the same way.
#[must_use]
#[derive(Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Unique username of the new user.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,

    /// Plaintext password; hashed before it reaches the store.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

impl RegisterRequest {
    /// Creates a new registration request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Request payload for login.
#[must_use]
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    /// Creates a new login request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_fail_validation() {
        assert!(RegisterRequest::new("alice", "secret").validate().is_ok());
        assert!(RegisterRequest::new("alice", "").validate().is_err());
        assert!(RegisterRequest::new("", "secret").validate().is_err());
    }

    #[test]
    fn missing_fields_default_to_empty() -> anyhow::Result<()> {
        let request: RegisterRequest = serde_json::from_str(r#"{"username":"alice"}"#)?;

        assert_eq!(request.username, "alice");
        assert!(request.password.is_empty());
        assert!(request.validate().is_err());
        Ok(())
    }

    #[test]
    fn debug_hides_password() {
        let debug = format!("{:?}", LoginRequest::new("alice", "hunter2"));

        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
