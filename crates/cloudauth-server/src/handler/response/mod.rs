//! Response types for HTTP handlers.

mod authentication;
mod error_response;

pub use authentication::LoginResponse;
pub use error_response::ErrorResponse;
