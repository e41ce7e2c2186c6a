//! Server lifecycle management.
//!
//! Wraps the serve future with startup and shutdown logging and bounds how
//! long in-flight requests may drain once shutdown begins.

use std::future::Future;
use std::io;
use std::time::{Duration, Instant};

use tokio::sync::watch;

use super::{ServerError, ServerResult};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Serves with lifecycle logging and maps failures to [`ServerError::Runtime`].
pub async fn serve_with_shutdown<F>(
    server_config: &ServerConfig,
    serve_fn: impl FnOnce() -> F,
) -> ServerResult<()>
where
    F: Future<Output = io::Result<()>>,
{
    let start_time = Instant::now();

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_config.server_addr(),
        "Server is ready and listening for connections"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Server bound to all interfaces, ensure firewall is configured"
        );
    }

    let result = serve_fn().await;
    let uptime = start_time.elapsed();

    match result {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                uptime_secs = uptime.as_secs(),
                "Shutdown completed"
            );
            Ok(())
        }
        Err(err) => {
            let err = ServerError::Runtime(err);
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                error_code = err.error_code(),
                suggestion = err.suggestion(),
                uptime_secs = uptime.as_secs(),
                "Fatal error"
            );
            Err(err)
        }
    }
}

/// Runs `serve` until it finishes or `deadline` has passed since `draining`
/// flipped to `true`, whichever comes first.
///
/// Requests still open at the deadline are dropped.
pub async fn drain_with_deadline<F>(
    serve: F,
    mut draining: watch::Receiver<bool>,
    deadline: Duration,
) -> io::Result<()>
where
    F: Future<Output = io::Result<()>>,
{
    let expired = async move {
        if draining.wait_for(|draining| *draining).await.is_err() {
            // No shutdown was ever requested.
            std::future::pending::<()>().await;
        }

        tokio::time::sleep(deadline).await;
    };

    tokio::select! {
        result = serve => result,
        () = expired => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                timeout_secs = deadline.as_secs(),
                "Shutdown timeout elapsed, dropping remaining connections"
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serve_with_shutdown_success() {
        let config = ServerConfig::default();
        let result = serve_with_shutdown(&config, || async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn serve_with_shutdown_handles_error() {
        let config = ServerConfig::default();
        let result =
            serve_with_shutdown(&config, || async { Err(io::Error::other("test error")) }).await;

        assert!(matches!(result, Err(ServerError::Runtime(_))));
    }

    #[tokio::test]
    async fn drain_returns_when_server_finishes() -> anyhow::Result<()> {
        let (_draining_tx, draining_rx) = watch::channel(false);

        drain_with_deadline(async { Ok(()) }, draining_rx, Duration::from_secs(30)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn drain_gives_up_after_deadline() -> anyhow::Result<()> {
        let (draining_tx, draining_rx) = watch::channel(false);
        draining_tx.send(true)?;

        let stuck = std::future::pending::<io::Result<()>>();
        let result = tokio::time::timeout(
            Duration::from_secs(5),
            drain_with_deadline(stuck, draining_rx, Duration::from_millis(10)),
        )
        .await?;

        assert!(result.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn drain_waits_without_shutdown_request() {
        let (draining_tx, draining_rx) = watch::channel(false);
        drop(draining_tx);

        let stuck = std::future::pending::<io::Result<()>>();
        let result = tokio::time::timeout(
            Duration::from_millis(50),
            drain_with_deadline(stuck, draining_rx, Duration::from_millis(1)),
        )
        .await;

        assert!(result.is_err());
    }
}
