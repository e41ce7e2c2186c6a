//! Authentication extractors.

mod auth_header;

pub use self::auth_header::{AuthHeader, bearer_token};
