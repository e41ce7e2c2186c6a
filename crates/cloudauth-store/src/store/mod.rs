//! The user store contract and its adapters.

mod file;
mod memory;

use async_trait::async_trait;

pub use self::file::{FileStoreConfig, FileUserStore};
pub use self::memory::MemoryUserStore;
use crate::{StoreResult, User};

/// Key-value persistence for [`User`] records keyed by username.
///
/// Implementations own their consistency guarantees. In particular
/// [`UserStore::insert`] must behave as an atomic insert-if-absent: two
/// concurrent inserts for the same username never both succeed.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Returns whether a record exists for `username`.
    async fn exists(&self, username: &str) -> StoreResult<bool>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if a record with the same
    /// username is already present, or a fault variant on storage failure.
    ///
    /// [`StoreError::AlreadyExists`]: crate::StoreError::AlreadyExists
    async fn insert(&self, user: User) -> StoreResult<()>;

    /// Fetches the record for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record exists.
    ///
    /// [`StoreError::NotFound`]: crate::StoreError::NotFound
    async fn get(&self, username: &str) -> StoreResult<User>;
}
