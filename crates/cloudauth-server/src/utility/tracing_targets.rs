//! Tracing target constants for consistent logging.

/// Password hashing and verification.
pub const PASSWORD_HASHER: &str = "cloudauth_server::service::hasher";

/// Signing key setup.
pub const SESSION_KEYS: &str = "cloudauth_server::service::session_keys";

/// Token issuance and validation.
pub const SESSION_TOKEN: &str = "cloudauth_server::service::token";

/// Registration and login orchestration.
pub const AUTH_SERVICE: &str = "cloudauth_server::service::auth";

/// Service state initialisation.
pub const SERVICE_STATE: &str = "cloudauth_server::service::state";

/// Bearer header extraction.
pub const AUTHENTICATION: &str = "cloudauth_server::extract::auth";

/// Authentication HTTP handlers.
pub const HANDLER_AUTH: &str = "cloudauth_server::handler::authentication";

/// Protected HTTP handlers.
pub const HANDLER_PROTECTED: &str = "cloudauth_server::handler::protected";

/// Authentication middleware.
pub const MIDDLEWARE_AUTH: &str = "cloudauth_server::middleware::auth";
