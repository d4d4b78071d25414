//! # Generic Client
//!
//! The handle callers hold to talk to a running [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use tokio::sync::{mpsc, oneshot};

/// ## ResourceClient
///
/// Type-safe, async front of a `ResourceActor<T>`. Each call sends one
/// [`ResourceRequest`] and waits on its oneshot reply.
///
/// * **Cloneable** – holds only a sender; every clone talks to the same actor.
/// * **Errors** – a closed channel is [`FrameworkError::ActorClosed`], a reply that never
///   arrives is [`FrameworkError::ActorDropped`]; anything else comes from the actor.
///
/// The actor stops once every clone is dropped.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    /// Creates a record and returns it as stored, with its generated ID.
    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    /// `Ok(None)` when no record has this ID.
    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn clear(&self) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Clear { respond_to })
            .await
    }

    async fn request<R>(
        &self,
        message: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, reply) = oneshot::channel();
        self.sender
            .send(message(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        reply.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
