//! HTTP server startup and graceful shutdown.

mod error;
mod http_server;
mod lifecycle;
mod shutdown;

pub use error::{ServerError, ServerResult};
pub use http_server::serve_http;
use lifecycle::serve_with_shutdown;
use shutdown::shutdown_signal;
