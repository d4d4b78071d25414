//! Collection store backends for the order collection.
//!
//! The in-process [`MemoryStore`](resource_actor::MemoryStore) comes from the framework;
//! this module adds the hosted key-value REST backend and the placeholder used when
//! nothing is configured.

pub mod kv_rest;
pub mod unconfigured;

pub use kv_rest::KvRestStore;
pub use unconfigured::UnconfiguredStore;
