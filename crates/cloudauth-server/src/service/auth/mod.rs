//! Registration and login orchestration.

mod error;
mod request;
mod service;

pub use error::AuthError;
pub use request::{LoginRequest, RegisterRequest};
pub use service::AuthService;
