use std::sync::Arc;

use cloudauth_store::{StoreError, User, UserStore};
use validator::Validate;

use super::{AuthError, RegisterRequest};
use crate::service::security::{PasswordHasher, TokenIssuer};
use crate::utility::tracing_targets::AUTH_SERVICE as TRACING_TARGET;

/// Registers users and exchanges credentials for access tokens.
///
/// Argon2 work runs on the blocking thread pool so a burst of logins does
/// not stall the async workers.
#[derive(Clone)]
pub struct AuthService {
    user_store: Arc<dyn UserStore>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

impl AuthService {
    /// Creates a new auth service over the given collaborators.
    pub fn new(
        user_store: Arc<dyn UserStore>,
        password_hasher: PasswordHasher,
        token_issuer: TokenIssuer,
    ) -> Self {
        Self {
            user_store,
            password_hasher,
            token_issuer,
        }
    }

    /// Registers a new user.
    ///
    /// The existence check short-circuits the common duplicate case; the
    /// store's conditional insert is what actually guarantees uniqueness when
    /// two registrations for the same username race.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] if the username or password is empty.
    /// - [`AuthError::Conflict`] if the username is taken.
    /// - [`AuthError::Internal`] on any store or hashing fault.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AuthError> {
        if let Err(errors) = request.validate() {
            tracing::debug!(
                target: TRACING_TARGET,
                error = %errors,
                "registration request failed validation",
            );
            return Err(AuthError::Validation);
        }

        let username = request.username.as_str();
        let exists = self.user_store.exists(username).await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to check user existence",
            );
            AuthError::Internal
        })?;

        if exists {
            tracing::info!(
                target: TRACING_TARGET,
                username = %username,
                "registration rejected, username taken",
            );
            return Err(AuthError::Conflict);
        }

        let password_hash = self.hash_password(request.password.clone()).await?;

        match self.user_store.insert(User::new(username, password_hash)).await {
            Ok(()) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    username = %username,
                    "user registered",
                );
                Ok(())
            }
            Err(StoreError::AlreadyExists) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    username = %username,
                    "registration lost a concurrent insert race",
                );
                Err(AuthError::Conflict)
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "failed to insert user",
                );
                Err(AuthError::Internal)
            }
        }
    }

    /// Verifies credentials and issues an access token.
    ///
    /// An unknown username costs the same hashing work as a wrong password
    /// and produces the same error, so callers cannot probe for accounts.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Unauthorized`] on unknown username or wrong password.
    /// - [`AuthError::Internal`] on store, hashing or signing faults.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = match self.user_store.get(username).await {
            Ok(user) => Some(user),
            Err(StoreError::NotFound) => None,
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "failed to fetch user",
                );
                return Err(AuthError::Internal);
            }
        };

        let stored_hash = user.as_ref().map(|user| user.password_hash.clone());
        let password_matches = self
            .verify_password(stored_hash, password.to_owned())
            .await?;

        let Some(user) = user.filter(|_| password_matches) else {
            tracing::info!(
                target: TRACING_TARGET,
                username = %username,
                "login rejected, invalid credentials",
            );
            return Err(AuthError::Unauthorized);
        };

        // Signing failure fails the login rather than handing out a bad token.
        let token = self
            .token_issuer
            .issue(&user.username)
            .map_err(|_| AuthError::Internal)?;

        tracing::info!(
            target: TRACING_TARGET,
            username = %user.username,
            "user logged in",
        );

        Ok(token)
    }

    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.password_hasher.clone();
        let result = tokio::task::spawn_blocking(move || hasher.hash_password(&password)).await;

        match result {
            Ok(Ok(password_hash)) => Ok(password_hash),
            Ok(Err(_)) => Err(AuthError::Internal),
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing task failed",
                );
                Err(AuthError::Internal)
            }
        }
    }

    async fn verify_password(
        &self,
        stored_hash: Option<String>,
        password: String,
    ) -> Result<bool, AuthError> {
        let hasher = self.password_hasher.clone();
        let result = tokio::task::spawn_blocking(move || match stored_hash {
            Some(stored_hash) => hasher.verify_password(&password, &stored_hash),
            None => hasher.verify_dummy_password(&password),
        })
        .await;

        result.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "password verification task failed",
            );
            AuthError::Internal
        })
    }
}
