use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{StoreError, StoreResult, TRACING_TARGET_MEMORY, User, UserStore};

/// In-process [`UserStore`] backed by a shared hash map.
///
/// Clones share the same underlying table.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn exists(&self, username: &str) -> StoreResult<bool> {
        Ok(self.users.read().await.contains_key(username))
    }

    async fn insert(&self, user: User) -> StoreResult<()> {
        let mut users = self.users.write().await;
        match users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists),
            Entry::Vacant(slot) => {
                tracing::debug!(
                    target: TRACING_TARGET_MEMORY,
                    username = %user.username,
                    "user record inserted"
                );
                slot.insert(user);
                Ok(())
            }
        }
    }

    async fn get(&self, username: &str) -> StoreResult<User> {
        self.users
            .read()
            .await
            .get(username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_get() -> anyhow::Result<()> {
        let store = MemoryUserStore::new();
        assert!(!store.exists("alice").await?);

        store.insert(User::new("alice", "hash")).await?;

        assert!(store.exists("alice").await?);
        assert_eq!(store.get("alice").await?, User::new("alice", "hash"));
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn insert_is_conditional() -> anyhow::Result<()> {
        let store = MemoryUserStore::new();
        store.insert(User::new("alice", "first")).await?;

        let result = store.insert(User::new("alice", "second")).await;
        assert!(matches!(result, Err(StoreError::AlreadyExists)));
        assert_eq!(store.get("alice").await?.password_hash, "first");
        Ok(())
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = MemoryUserStore::new();
        assert!(matches!(store.get("ghost").await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn concurrent_inserts_admit_one_winner() -> anyhow::Result<()> {
        let store = MemoryUserStore::new();
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(User::new("bob", format!("h{i}"))).await })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await?.is_ok() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(store.len().await, 1);
        Ok(())
    }
}
