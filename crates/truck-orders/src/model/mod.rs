//! Pure data structures; [`Order`] implements the [`ActorEntity`](resource_actor::ActorEntity) trait.

pub mod order;

pub use order::*;
