//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Authentication of protected routes
//! - Security (CORS, body limits)
//! - Observability (tracing, request IDs)
//! - Recovery (panics, timeouts)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cloudauth_server::middleware::{
//!     CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app = router
//!     .with_security(&CorsConfig::default())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```

mod auth;
mod observability;
mod recovery;
mod security;

pub use auth::require_authentication;
pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, DEFAULT_MAX_BODY_SIZE, RouterSecurityExt};
