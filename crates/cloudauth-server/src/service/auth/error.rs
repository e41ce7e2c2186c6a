/// Business outcomes of registration and login.
///
/// Variants carry no detail; the cause of an `Internal` failure is logged
/// where it happens and never surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum AuthError {
    /// Bad input shape, such as an empty username or password.
    #[error("invalid request")]
    Validation,
    /// The username is already registered.
    #[error("user already exists")]
    Conflict,
    /// Unknown username or wrong password.
    #[error("invalid credentials")]
    Unauthorized,
    /// Store, hashing or signing fault.
    #[error("internal error")]
    Internal,
}
