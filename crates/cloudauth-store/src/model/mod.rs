//! Persisted record types.

mod user;

pub use user::User;
