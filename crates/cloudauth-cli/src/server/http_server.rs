//! HTTP server startup.

use std::future::IntoFuture;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;

use super::lifecycle::drain_with_deadline;
use super::{ServerError, ServerResult, serve_with_shutdown, shutdown_signal};
use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;

/// Starts an HTTP server with graceful shutdown.
///
/// Validates the configuration, binds the listener and serves until SIGINT
/// or SIGTERM. In-flight requests get up to the configured shutdown timeout
/// to complete.
///
/// # Errors
///
/// Returns an error if:
/// - Server configuration is invalid
/// - Cannot bind to the specified address/port
/// - Server encounters a fatal error during operation
pub async fn serve_http(app: Router, server_config: &ServerConfig) -> ServerResult<()> {
    if let Err(validation_error) = server_config.validate() {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = %validation_error,
            "Invalid server configuration"
        );

        return Err(ServerError::invalid_config(&validation_error));
    }

    let server_addr = server_config.server_addr();
    let listener = match TcpListener::bind(server_addr).await {
        Ok(listener) => listener,
        Err(listener_err) => {
            let err = ServerError::bind_error(server_addr, listener_err);
            tracing::error!(
                target: TRACING_TARGET_SERVER_STARTUP,
                addr = %server_addr,
                error = %err,
                suggestion = err.suggestion(),
                "Failed to bind to address"
            );

            return Err(err);
        }
    };

    let (draining_tx, draining_rx) = watch::channel(false);
    let shutdown = async move {
        shutdown_signal().await;
        let _ = draining_tx.send(true);
    };

    let shutdown_timeout = server_config.shutdown_timeout();
    serve_with_shutdown(server_config, || async move {
        let server = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .into_future();

        drain_with_deadline(server, draining_rx, shutdown_timeout).await
    })
    .await
}
