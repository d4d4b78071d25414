//! # System Lifecycle
//!
//! Starting, wiring and stopping the order actor.
//!
//! [`OrderSystem::new`] creates the actor, injects its [`OrderContext`](crate::order_actor::OrderContext)
//! through `run(context)` and spawns it. Shutdown follows the channel-closure pattern:
//!
//! 1. **Drop all clients** - the HTTP server drops its state, then the system drops its own client
//! 2. **Actor detects closure** - `receiver.recv()` returns `None` once the queue is empty
//! 3. **Await completion** - the actor logs `Shutdown` and its task finishes
//!
//! No request that reached the channel is lost.

pub mod order_system;

pub use order_system::*;
