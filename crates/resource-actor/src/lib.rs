//! # Resource Actor
//!
//! This crate provides the building blocks for serving a persisted collection of records
//! through a single actor. It implements a **Resource-Oriented Architecture (ROA)** pattern
//! on top of the **Actor Model**: every record type gets uniform CRUD operations, and one
//! Tokio task owns all access to the collection.
//!
//! ## Why an actor in front of a collection store?
//!
//! Many small services keep their state as *one* value in an external store (a JSON array
//! under a single key) and rewrite it whole on every change. Served directly from
//! concurrent request handlers, that read-modify-write sequence loses updates when two
//! requests interleave. Routing every request through one actor makes each sequence run
//! to completion before the next one starts.
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Your record type and how it is created and changed
//! 2. **Storage Layer** ([`CollectionStore`]) - Where the collection lives ([`MemoryStore`] or your own backend)
//! 3. **Runtime Layer** ([`ResourceActor`]) - Message processing and the load → transform → save cycle
//! 4. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe communication
//!
//! ## Failure Policy
//!
//! - Reads (`get`, `list`) that hit a failing store are logged and served from an empty
//!   collection.
//! - Mutations (`create`, `update`, `delete`, `clear`) surface store failures as
//!   [`FrameworkError::Store`]. Nothing is retried.
//!
//! ## Testing
//!
//! The [`mock`] module provides a `MockClient` that answers requests from queued
//! expectations, for testing client wrappers without spawning actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod store;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::{FrameworkError, StoreError};
pub use message::{ResourceRequest, Response};
pub use store::{CollectionStore, MemoryStore};
