use async_trait::async_trait;
use resource_actor::{ActorEntity, CollectionStore, StoreError};
use std::marker::PhantomData;

/// Stands in for a missing backend so the server still starts.
///
/// Reads fail, which the actor degrades to an empty collection; writes fail with
/// [`StoreError::Unavailable`].
pub struct UnconfiguredStore<T> {
    _entity: PhantomData<fn() -> T>,
}

impl<T> UnconfiguredStore<T> {
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<T> Default for UnconfiguredStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

const REASON: &str = "no order store is configured";

#[async_trait]
impl<T: ActorEntity> CollectionStore<T> for UnconfiguredStore<T> {
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        Err(StoreError::Unavailable(REASON.to_string()))
    }

    async fn save(&self, _items: &[T]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(REASON.to_string()))
    }

    fn backend(&self) -> &'static str {
        "unconfigured"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Order;

    #[tokio::test]
    async fn test_every_call_is_unavailable() {
        let store = UnconfiguredStore::<Order>::new();
        assert!(matches!(store.load().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.save(&[]).await, Err(StoreError::Unavailable(_))));
        assert_eq!(store.backend(), "unconfigured");
    }
}
