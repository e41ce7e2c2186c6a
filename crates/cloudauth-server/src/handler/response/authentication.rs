use serde::{Deserialize, Serialize};

/// Response body of a successful login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token for the authenticated user.
    pub access_token: String,
}

impl LoginResponse {
    /// Wraps an issued access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}
