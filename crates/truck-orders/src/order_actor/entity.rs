//! Entity trait implementation for the Order domain type.
//!
//! This module contains the [`ActorEntity`] implementation that lets [`Order`] be managed
//! by the generic [`ResourceActor`](resource_actor::ResourceActor). Creation stamps the
//! order from the injected clock; updates merge the allowed fields and stamp `updatedAt`.

use super::{OrderContext, OrderError};
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate};
use async_trait::async_trait;
use chrono::Duration;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Context = OrderContext;
    type Error = OrderError;

    fn id(&self) -> OrderId {
        self.id
    }

    /// Builds a pending order; client-supplied status and timestamps never reach here.
    fn from_create_params(
        id: OrderId,
        params: OrderCreate,
        ctx: &OrderContext,
    ) -> Result<Self, OrderError> {
        Ok(Order::new(id, params, ctx.clock.now()))
    }

    /// `updatedAt` is always strictly after `createdAt`, even if the clock lags.
    async fn on_update(&mut self, update: OrderUpdate, ctx: &OrderContext) -> Result<(), OrderError> {
        self.apply(update);

        let earliest = self.created_at + Duration::milliseconds(1);
        self.updated_at = Some(ctx.clock.now().max(earliest));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SteppingClock;
    use crate::model::OrderStatus;
    use chrono::{DateTime, Utc};
    use std::sync::Arc;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_760_520_600_000).unwrap()
    }

    fn context(step_millis: i64) -> OrderContext {
        OrderContext::new(Arc::new(SteppingClock::new(
            start(),
            Duration::milliseconds(step_millis),
        )))
    }

    #[tokio::test]
    async fn test_update_stamps_updated_at_after_created_at() {
        let ctx = context(250);
        let mut order = Order::from_create_params(OrderId(1), OrderCreate::default(), &ctx).unwrap();
        assert_eq!(order.created_at, start());
        assert!(order.updated_at.is_none());

        order
            .on_update(OrderUpdate::status(OrderStatus::Preparing), &ctx)
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.updated_at, Some(start() + Duration::milliseconds(250)));
    }

    #[tokio::test]
    async fn test_lagging_clock_still_moves_updated_at_forward() {
        let ctx = context(0);
        let mut order = Order::from_create_params(OrderId(1), OrderCreate::default(), &ctx).unwrap();

        order
            .on_update(OrderUpdate::status(OrderStatus::Ready), &ctx)
            .await
            .unwrap();

        assert_eq!(order.updated_at, Some(order.created_at + Duration::milliseconds(1)));
    }
}
