use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::extract::AuthHeader;
use crate::utility::tracing_targets::MIDDLEWARE_AUTH as TRACING_TARGET;

/// Requires a valid, unexpired bearer token to proceed with the request.
///
/// Rejections come from the [`AuthHeader`] extractor. On success the wrapped
/// handler runs and its response is returned untouched.
///
/// #### Examples
///
/// ```rust,ignore
/// use axum::middleware::from_fn_with_state;
/// use cloudauth_server::middleware::require_authentication;
///
/// let guard = from_fn_with_state(state, require_authentication);
/// ```
pub async fn require_authentication(
    auth_header: AuthHeader,
    request: Request,
    next: Next,
) -> Response {
    tracing::trace!(
        target: TRACING_TARGET,
        subject = %auth_header.subject(),
        "request authenticated",
    );

    next.run(request).await
}
