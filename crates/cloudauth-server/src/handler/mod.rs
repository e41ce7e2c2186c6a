//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use cloudauth_server::handler::{CustomRoutes, routes};
//! use cloudauth_server::service::{ServiceConfig, ServiceState};
//!
//! let config = ServiceConfig::builder().with_jwt_secret("secret").build()?;
//! let state = ServiceState::from_config(&config).await?;
//! let router = routes(CustomRoutes::new(), state.clone()).with_state(state);
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod authentication;
mod error;
mod protected;
mod response;
mod utils;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::{ErrorResponse, LoginResponse};
pub use crate::handler::utils::CustomRoutes;
use crate::middleware::require_authentication;
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all private routes.
fn private_routes(additional_routes: Option<Router<ServiceState>>) -> Router<ServiceState> {
    let mut router = Router::new().merge(protected::routes());

    if let Some(additional) = additional_routes {
        router = router.merge(additional);
    }

    router
}

/// Returns a [`Router`] with all public routes.
fn public_routes(additional_routes: Option<Router<ServiceState>>) -> Router<ServiceState> {
    let mut router = Router::new().merge(authentication::routes());

    if let Some(additional) = additional_routes {
        router = router.merge(additional);
    }

    router
}

/// Returns a [`Router`] with all routes.
pub fn routes(routes: CustomRoutes, state: ServiceState) -> Router<ServiceState> {
    let require_authentication = from_fn_with_state(state, require_authentication);

    // Private routes with authentication middleware
    let private_router = private_routes(routes.private_routes).route_layer(require_authentication);

    // Public routes without authentication
    let public_router = public_routes(routes.public_routes);

    Router::new()
        .merge(private_router)
        .merge(public_router)
        .fallback(handler)
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::http::header::AUTHORIZATION;
    use axum::routing::get;
    use axum_test::TestServer;
    use cloudauth_store::{MemoryUserStore, StoreResult, User, UserStore};
    use jiff::Timestamp;
    use serde_json::json;

    use crate::extract::AuthHeader;
    use crate::handler::{CustomRoutes, LoginResponse, routes};
    use crate::service::{ServiceConfig, ServiceState};

    const TEST_SECRET: &str = "handler-test-secret";

    /// Returns a fresh in-memory [`ServiceState`].
    fn create_test_state() -> anyhow::Result<ServiceState> {
        create_test_state_with_store(Arc::new(MemoryUserStore::new()))
    }

    fn create_test_state_with_store(
        user_store: Arc<dyn UserStore>,
    ) -> anyhow::Result<ServiceState> {
        let config = ServiceConfig::builder().with_jwt_secret(TEST_SECRET).build()?;
        Ok(ServiceState::with_user_store(&config, user_store)?)
    }

    /// Returns a new [`TestServer`] with the given custom routes and state.
    fn create_test_server_with_state(
        custom_routes: CustomRoutes,
        state: ServiceState,
    ) -> anyhow::Result<TestServer> {
        let app = routes(custom_routes, state.clone()).with_state(state);
        Ok(TestServer::new(app)?)
    }

    /// Returns a new [`TestServer`] with the default router and state.
    fn create_test_server() -> anyhow::Result<(TestServer, ServiceState)> {
        let state = create_test_state()?;
        let server = create_test_server_with_state(CustomRoutes::new(), state.clone())?;
        Ok((server, state))
    }

    async fn register_alice(server: &TestServer) {
        server
            .post("/register")
            .json(&json!({ "username": "alice", "password": "secret" }))
            .await
            .assert_status_ok();
    }

    /// Store double whose every operation fails with an I/O fault.
    struct FaultyStore;

    #[async_trait::async_trait]
    impl UserStore for FaultyStore {
        async fn exists(&self, _username: &str) -> StoreResult<bool> {
            Err(std::io::Error::other("table unavailable").into())
        }

        async fn insert(&self, _user: User) -> StoreResult<()> {
            Err(std::io::Error::other("table unavailable").into())
        }

        async fn get(&self, _username: &str) -> StoreResult<User> {
            Err(std::io::Error::other("table unavailable").into())
        }
    }

    #[tokio::test]
    async fn register_twice_conflicts() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server
            .post("/register")
            .json(&json!({ "username": "alice", "password": "secret" }))
            .await;
        response.assert_status_ok();
        response.assert_text("Success");

        let response = server
            .post("/register")
            .json(&json!({ "username": "alice", "password": "secret" }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        response.assert_text("User already exists");
        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        register_alice(&server).await;

        let response = server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "wrong" }))
            .await;
        response.assert_status_unauthorized();
        response.assert_text("Invalid login credentials");
        Ok(())
    }

    #[tokio::test]
    async fn login_with_unknown_user_is_unauthorized() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server
            .post("/login")
            .json(&json!({ "username": "nobody", "password": "secret" }))
            .await;
        response.assert_status_unauthorized();
        response.assert_text("Invalid login credentials");
        Ok(())
    }

    #[tokio::test]
    async fn login_returns_access_token() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        register_alice(&server).await;

        let response = server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "secret" }))
            .await;
        response.assert_status_ok();

        let body = response.json::<LoginResponse>();
        assert!(!body.access_token.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn protected_accepts_valid_token() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        register_alice(&server).await;

        let login = server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "secret" }))
            .await
            .json::<LoginResponse>();

        let response = server
            .get("/protected")
            .add_header(AUTHORIZATION, format!("Bearer {}", login.access_token))
            .await;
        response.assert_status_ok();
        assert!(response.text().contains("alice"));
        Ok(())
    }

    #[tokio::test]
    async fn protected_without_header_is_missing_token() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server.get("/protected").await;
        response.assert_status_unauthorized();
        response.assert_text("Missing Auth token");
        Ok(())
    }

    #[tokio::test]
    async fn protected_with_misshapen_header_is_missing_token() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let token = state.token_issuer.issue("alice")?;

        for header in [
            format!("Basic {token}"),
            format!("Bearer {token} Bearer {token}"),
            "Bearer ".to_string(),
            token.clone(),
        ] {
            let response = server
                .get("/protected")
                .add_header(AUTHORIZATION, header)
                .await;
            response.assert_status_unauthorized();
            response.assert_text("Missing Auth token");
        }
        Ok(())
    }

    #[tokio::test]
    async fn protected_with_expired_token_is_expired() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let two_hours_ago = Timestamp::from_second(Timestamp::now().as_second() - 7200)?;
        let token = state.token_issuer.issue_at("alice", two_hours_ago)?;

        let response = server
            .get("/protected")
            .add_header(AUTHORIZATION, format!("Bearer {token}"))
            .await;
        response.assert_status_unauthorized();
        response.assert_text("token expired");
        Ok(())
    }

    #[tokio::test]
    async fn protected_with_forged_token_is_unauthorized() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let other_config = ServiceConfig::builder()
            .with_jwt_secret("some-other-secret")
            .build()?;
        let other_state =
            ServiceState::with_user_store(&other_config, Arc::new(MemoryUserStore::new()))?;
        let token = other_state.token_issuer.issue("alice")?;

        let response = server
            .get("/protected")
            .add_header(AUTHORIZATION, format!("Bearer {token}"))
            .await;
        response.assert_status_unauthorized();
        response.assert_text("User Unauthorized");
        Ok(())
    }

    #[tokio::test]
    async fn register_with_empty_password_is_invalid() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server
            .post("/register")
            .json(&json!({ "username": "alice", "password": "" }))
            .await;
        response.assert_status_bad_request();
        response.assert_text("Invalid Request");
        Ok(())
    }

    #[tokio::test]
    async fn malformed_bodies_are_bad_requests() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server.post("/register").text("{not json").await;
        response.assert_status_bad_request();
        response.assert_text("Invalid Request");

        let response = server.post("/login").text("{not json").await;
        response.assert_status_bad_request();
        response.assert_text("invalid request");
        Ok(())
    }

    #[tokio::test]
    async fn store_faults_are_internal_errors() -> anyhow::Result<()> {
        let state = create_test_state_with_store(Arc::new(FaultyStore))?;
        let server = create_test_server_with_state(CustomRoutes::new(), state)?;

        let response = server
            .post("/register")
            .json(&json!({ "username": "alice", "password": "secret" }))
            .await;
        response.assert_status_internal_server_error();
        response.assert_text("Internal server error");

        let response = server
            .post("/login")
            .json(&json!({ "username": "alice", "password": "secret" }))
            .await;
        response.assert_status_internal_server_error();
        response.assert_text("Internal server error");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server.get("/nowhere").await;
        response.assert_status_not_found();
        response.assert_text("Not Found");
        Ok(())
    }

    #[tokio::test]
    async fn custom_private_routes_require_token() -> anyhow::Result<()> {
        let state = create_test_state()?;
        let custom_routes = CustomRoutes::new()
            .with_private_routes(axum::Router::new().route(
                "/whoami",
                get(|auth_header: AuthHeader| async move { auth_header.subject().to_owned() }),
            ))
            .with_public_routes(axum::Router::new().route("/ping", get(|| async { "pong" })));
        let server = create_test_server_with_state(custom_routes, state.clone())?;

        server.get("/ping").await.assert_text("pong");
        server.get("/whoami").await.assert_status_unauthorized();

        let token = state.token_issuer.issue("alice")?;
        let response = server
            .get("/whoami")
            .add_header(AUTHORIZATION, format!("Bearer {token}"))
            .await;
        response.assert_status_ok();
        response.assert_text("alice");
        Ok(())
    }
}
