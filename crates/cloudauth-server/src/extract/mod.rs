//! Custom HTTP request extractors.
//!
//! - [`AuthHeader`] - bearer token extraction and validation

pub mod auth;

pub use crate::extract::auth::{AuthHeader, bearer_token};
