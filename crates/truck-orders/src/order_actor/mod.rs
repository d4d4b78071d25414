//! Order-specific resource logic and entity implementation.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::clock::Clock;
use crate::model::{Order, OrderId};
use resource_actor::{CollectionStore, ResourceActor};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Capacity of the order actor's request channel.
pub const CHANNEL_CAPACITY: usize = 32;

/// Runtime dependencies injected into every [`Order`] hook.
#[derive(Clone)]
pub struct OrderContext {
    pub clock: Arc<dyn Clock>,
}

impl OrderContext {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

/// Creates a new Order actor and its client.
///
/// Order ids are the clock's milliseconds since the epoch. Two creates in the same
/// millisecond still get distinct ids: a candidate never goes below the previous id + 1.
pub fn new(
    store: Arc<dyn CollectionStore<Order>>,
    clock: Arc<dyn Clock>,
) -> (ResourceActor<Order>, OrderClient) {
    let last_id = AtomicI64::new(0);
    let next_order_id = move || {
        let now = clock.now().timestamp_millis();
        let previous = last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        OrderId(now.max(previous + 1))
    };

    let (actor, generic_client) = ResourceActor::new(CHANNEL_CAPACITY, store, next_order_id);
    let client = OrderClient::new(generic_client);

    (actor, client)
}
