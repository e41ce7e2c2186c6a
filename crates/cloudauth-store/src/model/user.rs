use std::fmt;

use serde::{Deserialize, Serialize};

/// A registered user as persisted in the user table.
///
/// The username is the primary key. The hash is stored under the `password`
/// field name to keep the table's record shape stable; it never holds the
/// plaintext password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique username (primary key).
    pub username: String,
    /// Salted password hash in PHC string format.
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl User {
    /// Creates a new user record from a username and an already computed hash.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
