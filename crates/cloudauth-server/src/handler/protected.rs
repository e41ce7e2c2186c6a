//! Resources reachable only with a valid bearer token.

use axum::Router;
use axum::routing::get;

use crate::extract::AuthHeader;
use crate::service::ServiceState;
use crate::utility::tracing_targets::HANDLER_PROTECTED as TRACING_TARGET;

/// Greets the authenticated user.
#[tracing::instrument(skip_all)]
async fn protected(auth_header: AuthHeader) -> String {
    tracing::debug!(
        target: TRACING_TARGET,
        subject = %auth_header.subject(),
        "protected resource served",
    );

    format!(
        "Hello, {}! This is a protected resource.",
        auth_header.subject()
    )
}

/// Returns a [`Router`] with all related routes.
pub(super) fn routes() -> Router<ServiceState> {
    Router::new().route("/protected", get(protected))
}
