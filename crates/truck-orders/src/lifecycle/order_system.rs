use crate::clients::OrderClient;
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, StorageConfig};
use crate::model::Order;
use crate::order_actor::{self, OrderContext};
use crate::state::{AppState, StorageInfo};
use crate::storage::{KvRestStore, UnconfiguredStore};
use resource_actor::{CollectionStore, MemoryStore};
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Owns the running order actor.
///
/// `OrderSystem` is responsible for:
/// - **Lifecycle Management**: spawning the order actor and stopping it again
/// - **Dependency Wiring**: injecting the clock into the actor's hooks
/// - **Backend Selection**: turning the storage configuration into a [`CollectionStore`]
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::from_config(&config);
/// let order = system.order_client.create_order(OrderCreate::default()).await?;
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    /// Clock shared by the actor and the health endpoint
    pub clock: Arc<dyn Clock>,

    pub storage: StorageInfo,

    handle: JoinHandle<()>,
}

impl OrderSystem {
    /// Spawns the order actor over `store`. Must be called inside a Tokio runtime.
    pub fn new(store: Arc<dyn CollectionStore<Order>>, clock: Arc<dyn Clock>) -> Self {
        let storage = StorageInfo::new(store.backend());

        let (order_actor, order_client) = order_actor::new(store, clock.clone());
        let handle = tokio::spawn(order_actor.run(OrderContext::new(clock.clone())));

        Self {
            order_client,
            clock,
            storage,
            handle,
        }
    }

    /// Picks the backend named by `config` and runs on the system clock.
    pub fn from_config(config: &Config) -> Self {
        Self::new(build_store(config), Arc::new(SystemClock))
    }

    /// State for the HTTP handlers. Holds a clone of the order client.
    pub fn app_state(&self, production: bool) -> AppState {
        AppState {
            orders: self.order_client.clone(),
            clock: self.clock.clone(),
            storage: self.storage,
            production,
        }
    }

    /// Drops the client and waits for the actor to drain its queue.
    ///
    /// Every other clone of the client (including any [`AppState`]) must already be
    /// dropped, otherwise this waits for them.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down order system...");

        drop(self.order_client);

        if let Err(e) = self.handle.await {
            error!(error = %e, "Order actor task failed");
            return Err(e);
        }

        info!("Order system shutdown complete.");
        Ok(())
    }
}

pub fn build_store(config: &Config) -> Arc<dyn CollectionStore<Order>> {
    match &config.storage {
        StorageConfig::Memory => Arc::new(MemoryStore::<Order>::new()),
        StorageConfig::KvRest { url, token } => Arc::new(KvRestStore::<Order>::new(
            url.clone(),
            token.clone(),
            config.orders_key.clone(),
        )),
        StorageConfig::Unconfigured => Arc::new(UnconfiguredStore::<Order>::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderCreate;
    use resource_actor::ActorClient;

    #[tokio::test]
    async fn test_memory_system_round_trip_and_shutdown() {
        let config = Config::from_lookup(|key| (key == "ORDER_STORE").then(|| "memory".to_string()))
            .unwrap();
        let system = OrderSystem::from_config(&config);
        assert_eq!(system.storage, StorageInfo::new("memory"));

        let order = system
            .order_client
            .create_order(OrderCreate::default())
            .await
            .unwrap();
        assert_eq!(system.order_client.list().await.unwrap(), vec![order]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_unconfigured_system_reports_backend() {
        let config = Config::from_lookup(|_| None).unwrap();
        let system = OrderSystem::from_config(&config);
        let state = system.app_state(false);

        assert_eq!(state.storage.backend, "unconfigured");
        assert!(!state.storage.configured);

        drop(state);
        system.shutdown().await.unwrap();
    }
}
