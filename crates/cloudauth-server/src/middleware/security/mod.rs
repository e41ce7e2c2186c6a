//! Security middleware for HTTP request protection.
//!
//! - CORS preflight handling
//! - Request body size limiting
//! - `X-Content-Type-Options: nosniff` on every response

mod cors;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{self, HeaderValue};
pub use cors::CorsConfig;
pub(crate) use cors::create_cors_layer;
use tower_http::set_header::SetResponseHeaderLayer;

/// Upper bound for request bodies; credential payloads are tiny.
pub const DEFAULT_MAX_BODY_SIZE: usize = 64 * 1024;

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers CORS, body limit and response hardening headers.
    fn with_security(self, cors: &CorsConfig) -> Self;

    /// Layers security middlewares with the default CORS configuration.
    fn with_default_security(self) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig) -> Self {
        self.layer(DefaultBodyLimit::max(DEFAULT_MAX_BODY_SIZE))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(create_cors_layer(cors))
    }

    fn with_default_security(self) -> Self {
        self.with_security(&CorsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use axum::routing::post;
    use axum_test::TestServer;

    use super::*;

    fn secured_router(cors: &CorsConfig) -> Router {
        Router::new()
            .route("/login", post(|| async { "ok" }))
            .with_security(cors)
    }

    #[tokio::test]
    async fn preflight_allows_any_origin_by_default() -> anyhow::Result<()> {
        let server = TestServer::new(secured_router(&CorsConfig::default()))?;

        let response = server
            .method(Method::OPTIONS, "/login")
            .add_header(header::ORIGIN, "https://client.example")
            .add_header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .add_header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
            .await;

        response.assert_status(StatusCode::OK);
        response.assert_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
        Ok(())
    }

    #[tokio::test]
    async fn configured_origin_is_mirrored() -> anyhow::Result<()> {
        let cors = CorsConfig {
            allowed_origins: vec!["https://app.example".to_string()],
            ..Default::default()
        };
        let server = TestServer::new(secured_router(&cors))?;

        let response = server
            .post("/login")
            .add_header(header::ORIGIN, "https://app.example")
            .await;

        response.assert_status_ok();
        response.assert_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "https://app.example");
        Ok(())
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() -> anyhow::Result<()> {
        let router = Router::new()
            .route("/login", post(|body: axum::body::Bytes| async move { body.len().to_string() }))
            .with_default_security();
        let server = TestServer::new(router)?;

        let response = server
            .post("/login")
            .bytes(vec![b'a'; DEFAULT_MAX_BODY_SIZE + 1].into())
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        Ok(())
    }

    #[tokio::test]
    async fn responses_carry_nosniff() -> anyhow::Result<()> {
        let server = TestServer::new(secured_router(&CorsConfig::default()))?;

        let response = server.post("/login").await;
        response.assert_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff");
        Ok(())
    }
}
