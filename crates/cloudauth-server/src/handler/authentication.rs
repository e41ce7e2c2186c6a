//! Registration and login handlers.
//!
//! Bodies are read as raw bytes and parsed here, so malformed JSON maps to
//! the fixed 400 bodies instead of the framework's default rejection.

use axum::{Json, Router};
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use serde::de::DeserializeOwned;

use crate::handler::response::LoginResponse;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{AuthError, AuthService, LoginRequest, RegisterRequest, ServiceState};
use crate::utility::tracing_targets::HANDLER_AUTH as TRACING_TARGET;

/// Body text of a successful registration.
const REGISTER_SUCCESS: &str = "Success";

/// Body text of a malformed login request.
const LOGIN_INVALID_REQUEST: &str = "invalid request";

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(
            target: TRACING_TARGET,
            error = %e,
            "request body is not valid json",
        );
        ErrorKind::BadRequest.with_context(e.to_string())
    })
}

/// Registers a new user.
#[tracing::instrument(skip_all)]
async fn register(State(auth_service): State<AuthService>, body: Bytes) -> Result<&'static str> {
    let request: RegisterRequest = parse_body(&body)?;

    tracing::trace!(
        target: TRACING_TARGET,
        username = %request.username,
        "registration requested",
    );

    auth_service.register(&request).await?;
    Ok(REGISTER_SUCCESS)
}

/// Exchanges credentials for an access token.
#[tracing::instrument(skip_all)]
async fn login(
    State(auth_service): State<AuthService>,
    body: Bytes,
) -> Result<Json<LoginResponse>> {
    let request: LoginRequest =
        parse_body(&body).map_err(|e: Error| e.with_message(LOGIN_INVALID_REQUEST))?;

    tracing::trace!(
        target: TRACING_TARGET,
        username = %request.username,
        "login requested",
    );

    let access_token = auth_service
        .login(&request.username, &request.password)
        .await
        .map_err(|e| match e {
            AuthError::Validation => ErrorKind::BadRequest.with_message(LOGIN_INVALID_REQUEST),
            other => Error::from(other),
        })?;

    Ok(Json(LoginResponse::new(access_token)))
}

/// Returns a [`Router`] with all related routes.
pub(super) fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
