//! # Collection Stores
//!
//! A [`CollectionStore`] persists the *whole* collection of one entity type under a single
//! value. Every write replaces the previous value entirely, so the store itself offers no
//! protection against concurrent writers. The [`ResourceActor`](crate::ResourceActor) is
//! what serialises access inside one process.

use crate::entity::ActorEntity;
use crate::error::StoreError;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Read/write access to a persisted collection.
#[async_trait]
pub trait CollectionStore<T: ActorEntity>: Send + Sync {
    /// Fetch the full collection, in stored order.
    async fn load(&self) -> Result<Vec<T>, StoreError>;

    /// Overwrite the full collection.
    async fn save(&self, items: &[T]) -> Result<(), StoreError>;

    /// Short name of the backend, reported by health checks.
    fn backend(&self) -> &'static str;
}

/// In-process store. Nothing survives a restart.
pub struct MemoryStore<T> {
    items: Mutex<Vec<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// A store pre-seeded with `items`.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: ActorEntity> CollectionStore<T> for MemoryStore<T> {
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.items.lock().await.clone())
    }

    async fn save(&self, items: &[T]) -> Result<(), StoreError> {
        *self.items.lock().await = items.to_vec();
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
