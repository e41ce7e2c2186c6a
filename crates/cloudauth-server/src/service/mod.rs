//! Application state and dependency injection.

mod auth;
mod config;
mod security;

use std::sync::Arc;

use cloudauth_store::UserStore;

pub use crate::service::auth::{AuthError, AuthService, LoginRequest, RegisterRequest};
pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder, UserStoreKind};
pub use crate::service::security::{
    AuthClaims, PasswordHasher, SessionKeys, TokenError, TokenIssuer,
};
use crate::utility::tracing_targets::SERVICE_STATE as TRACING_TARGET;
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // External services:
    pub user_store: Arc<dyn UserStore>,

    // Internal services:
    pub password_hasher: PasswordHasher,
    pub session_keys: SessionKeys,
    pub token_issuer: TokenIssuer,
    pub auth_service: AuthService,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Opens the configured user store and derives the signing keys.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let user_store = config.open_user_store().await?;
        Self::with_user_store(config, user_store)
    }

    /// Initializes application state over an already opened user store.
    pub fn with_user_store(config: &ServiceConfig, user_store: Arc<dyn UserStore>) -> Result<Self> {
        let session_keys = config.session_keys()?;
        session_keys.validate_keys()?;

        let password_hasher = PasswordHasher::new()?;
        let token_issuer = TokenIssuer::new(session_keys.clone());
        let auth_service = AuthService::new(
            user_store.clone(),
            password_hasher.clone(),
            token_issuer.clone(),
        );

        tracing::debug!(target: TRACING_TARGET, "service state initialized");

        Ok(Self {
            user_store,
            password_hasher,
            session_keys,
            token_issuer,
            auth_service,
        })
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(user_store: Arc<dyn UserStore>);

// Internal services:
impl_di!(password_hasher: PasswordHasher);
impl_di!(session_keys: SessionKeys);
impl_di!(token_issuer: TokenIssuer);
impl_di!(auth_service: AuthService);
