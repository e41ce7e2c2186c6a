//! File-backed user table.
//!
//! Each record lives in its own JSON file named after the hex-encoded
//! SHA-256 digest of the username, so arbitrary usernames of any length map
//! to safe fixed-length file names and lookups are a single read. New records are first written to a staging file and then
//! published with a hard link. Linking fails if the target already exists,
//! which gives the store an atomic insert-if-absent primitive.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::{StoreError, StoreResult, TRACING_TARGET_FILE, User, UserStore};

/// File-backed store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct FileStoreConfig {
    /// Directory holding one JSON record per user.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "USER_TABLE_DIR", default_value = "./userTable")
    )]
    #[serde(default = "FileStoreConfig::default_table_dir")]
    pub table_dir: PathBuf,
}

impl FileStoreConfig {
    /// Creates a configuration pointing at `table_dir`.
    pub fn new(table_dir: impl AsRef<Path>) -> Self {
        Self {
            table_dir: table_dir.as_ref().to_path_buf(),
        }
    }

    fn default_table_dir() -> PathBuf {
        "./userTable".into()
    }
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            table_dir: Self::default_table_dir(),
        }
    }
}

/// [`UserStore`] persisting records as files in a table directory.
#[derive(Debug, Clone)]
pub struct FileUserStore {
    table_dir: PathBuf,
}

impl FileUserStore {
    /// Opens the table directory, creating it if missing.
    pub async fn open(config: &FileStoreConfig) -> StoreResult<Self> {
        let table_dir = config.table_dir.clone();

        fs::create_dir_all(&table_dir).await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_FILE,
                path = %table_dir.display(),
                error = %e,
                "failed to create user table directory"
            );
            StoreError::Io(e)
        })?;

        if !fs::metadata(&table_dir).await?.is_dir() {
            return Err(StoreError::unexpected("user table path is not a directory"));
        }

        tracing::info!(
            target: TRACING_TARGET_FILE,
            path = %table_dir.display(),
            "user table opened"
        );

        Ok(Self { table_dir })
    }

    /// Returns the table directory.
    #[inline]
    pub fn table_dir(&self) -> &Path {
        &self.table_dir
    }

    fn record_path(&self, username: &str) -> PathBuf {
        let digest = Sha256::digest(username.as_bytes());
        self.table_dir.join(format!("{}.json", hex::encode(digest)))
    }

    async fn write_staging(path: &Path, payload: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        file.write_all(payload).await?;
        file.sync_all().await
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn exists(&self, username: &str) -> StoreResult<bool> {
        Ok(fs::try_exists(self.record_path(username)).await?)
    }

    async fn insert(&self, user: User) -> StoreResult<()> {
        let record_path = self.record_path(&user.username);
        let staging_path = self.table_dir.join(format!(".{}.tmp", Uuid::new_v4()));
        let payload = serde_json::to_vec(&user)?;

        let staged = Self::write_staging(&staging_path, &payload).await;
        let published = match staged {
            Ok(()) => fs::hard_link(&staging_path, &record_path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = fs::remove_file(&staging_path).await
            && e.kind() != io::ErrorKind::NotFound
        {
            tracing::warn!(
                target: TRACING_TARGET_FILE,
                path = %staging_path.display(),
                error = %e,
                "failed to remove staging file"
            );
        }

        match published {
            Ok(()) => {
                tracing::debug!(
                    target: TRACING_TARGET_FILE,
                    username = %user.username,
                    "user record published"
                );
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(StoreError::AlreadyExists),
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET_FILE,
                    username = %user.username,
                    error = %e,
                    "failed to write user record"
                );
                Err(StoreError::Io(e))
            }
        }
    }

    async fn get(&self, username: &str) -> StoreResult<User> {
        let bytes = match fs::read(self.record_path(username)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET_FILE,
                    username = %username,
                    error = %e,
                    "failed to read user record"
                );
                return Err(StoreError::Io(e));
            }
        };

        let user: User = serde_json::from_slice(&bytes)?;
        if user.username != username {
            return Err(StoreError::unexpected("user record key mismatch"));
        }

        Ok(user)
    }
}
