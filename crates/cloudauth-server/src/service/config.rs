use std::fmt;
use std::sync::Arc;

#[cfg(feature = "config")]
use clap::{Args, ValueEnum};
use cloudauth_store::{FileStoreConfig, FileUserStore, MemoryUserStore, UserStore};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::service::SessionKeys;
use crate::utility::tracing_targets::SERVICE_STATE as TRACING_TARGET;
use crate::{Error, Result};

/// Backing store for user records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "config", derive(ValueEnum))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserStoreKind {
    /// Process-local table; records vanish on restart.
    #[default]
    Memory,
    /// One JSON file per user under the table directory.
    File,
}

/// App [`state`] configuration.
///
/// Every value the auth core needs is captured here once at startup and
/// handed to constructors explicitly.
///
/// [`state`]: crate::service::ServiceState
#[derive(Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Shared secret used to sign and verify access tokens.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "JWT_SECRET", hide_env_values = true)
    )]
    #[serde(default, skip_serializing)]
    pub jwt_secret: String,

    /// Which user store backs registration and login.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "USER_STORE", value_enum, default_value_t = UserStoreKind::Memory)
    )]
    #[serde(default)]
    #[builder(default)]
    pub user_store: UserStoreKind,

    /// File store settings, used when `user_store` is `file`.
    #[cfg_attr(feature = "config", command(flatten))]
    #[serde(default)]
    #[builder(default)]
    pub file_store: FileStoreConfig,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Derives the signing keys from the configured secret.
    pub fn session_keys(&self) -> Result<SessionKeys> {
        SessionKeys::from_secret(&self.jwt_secret)
    }

    /// Opens the configured user store.
    pub async fn open_user_store(&self) -> Result<Arc<dyn UserStore>> {
        let user_store: Arc<dyn UserStore> = match self.user_store {
            UserStoreKind::Memory => Arc::new(MemoryUserStore::new()),
            UserStoreKind::File => {
                let store = FileUserStore::open(&self.file_store).await.map_err(|e| {
                    Error::store("failed to open file user store").with_source(e)
                })?;
                Arc::new(store)
            }
        };

        tracing::info!(
            target: TRACING_TARGET,
            user_store = %self.user_store,
            "user store opened",
        );

        Ok(user_store)
    }
}

impl ServiceConfigBuilder {
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if let Some(secret) = &builder.jwt_secret
            && secret.is_empty()
        {
            return Err("jwt secret must not be empty".into());
        }

        Ok(())
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("user_store", &self.user_store)
            .field("file_store", &self.file_store)
            .finish()
    }
}
