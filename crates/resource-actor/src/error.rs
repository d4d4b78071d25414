//! # Framework Errors
//!
//! This module defines the common error types used throughout the actor framework.
//! Actor plumbing failures live in [`FrameworkError`]; failures of the backing
//! collection store live in [`StoreError`] and are wrapped by `FrameworkError::Store`.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by a [`CollectionStore`](crate::store::CollectionStore) backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// No backend is configured, or the backend refused the connection.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Store read failed: {0}")]
    Read(String),
    #[error("Store write failed: {0}")]
    Write(String),
    /// The stored value could not be encoded or decoded.
    #[error("Store codec error: {0}")]
    Codec(String),
}
