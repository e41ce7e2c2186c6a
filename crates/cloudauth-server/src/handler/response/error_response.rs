use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// HTTP error response rendered as a fixed plain-text body.
///
/// Only `message` reaches the client. `context` is diagnostic detail kept
/// for logs.
#[must_use = "error responses do nothing unless rendered"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier
    pub name: Cow<'a, str>,
    /// Body text sent to the client
    pub message: Cow<'a, str>,
    /// Internal context for debugging (never rendered)
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Invalid Request",
        StatusCode::BAD_REQUEST,
    );
    pub const CONFLICT: Self = Self::new(
        "conflict",
        "User already exists",
        StatusCode::CONFLICT,
    );
    pub const EXPIRED_AUTH_TOKEN: Self = Self::new(
        "expired_auth_token",
        "token expired",
        StatusCode::UNAUTHORIZED,
    );
    pub const INVALID_CREDENTIALS: Self = Self::new(
        "invalid_credentials",
        "Invalid login credentials",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_AUTH_TOKEN: Self = Self::new(
        "missing_auth_token",
        "Missing Auth token",
        StatusCode::UNAUTHORIZED,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "Not Found",
        StatusCode::NOT_FOUND,
    );
    pub const UNAUTHORIZED: Self = Self::new(
        "unauthorized",
        "User Unauthorized",
        StatusCode::UNAUTHORIZED,
    );
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Internal server error",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            context: None,
            status,
        }
    }

    /// Replaces the body text.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{existing}; {new_context}")),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, self.message.into_owned()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::header::CONTENT_TYPE;

    use super::*;

    #[test]
    fn error_response_replaces_message() {
        let response = ErrorResponse::BAD_REQUEST.with_message("invalid request");
        assert_eq!(response.message, "invalid request");
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_response_merging_context() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_context("store unavailable")
            .with_context("retry not attempted");

        assert_eq!(
            response.context.as_deref(),
            Some("store unavailable; retry not attempted")
        );
    }

    #[tokio::test]
    async fn renders_message_as_plain_text() -> anyhow::Result<()> {
        let response = ErrorResponse::MISSING_AUTH_TOKEN
            .with_context("no authorization header")
            .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        assert!(content_type.starts_with("text/plain"));

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert_eq!(&body[..], b"Missing Auth token");
        Ok(())
    }
}
