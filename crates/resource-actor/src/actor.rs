//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns every read and write
//! of one persisted collection. It implements the "Server" side of the Actor Model,
//! processing messages sequentially so that each load → transform → save cycle runs
//! without interleaving with another request from the same process.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::store::CollectionStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a persisted collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the receiver end of the
/// channel and the handle to the [`CollectionStore`]. It does **not** cache the
/// collection: every request loads it, and every mutation writes it back whole.
///
/// **Concurrency Model**:
/// Messages are handled one at a time in a loop, so two requests can never both read
/// the same collection version and then overwrite each other's change.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use async_trait::async_trait;
/// use resource_actor::{ActorEntity, MemoryStore, ResourceActor};
/// use std::sync::Arc;
///
/// #[derive(Clone, Debug)] struct Ticket { id: u32, seat: String }
/// #[derive(Debug)] struct TicketCreate { seat: String }
/// #[derive(Debug)] struct TicketUpdate;
/// #[derive(Debug)] struct TicketError;
/// impl std::fmt::Display for TicketError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "ticket") }
/// }
/// impl std::error::Error for TicketError {}
///
/// #[async_trait]
/// impl ActorEntity for Ticket {
///     type Id = u32;
///     type Create = TicketCreate;
///     type Update = TicketUpdate;
///     type Context = ();
///     type Error = TicketError;
///
///     fn id(&self) -> u32 { self.id }
///     fn from_create_params(id: u32, p: TicketCreate, _: &()) -> Result<Self, Self::Error> {
///         Ok(Self { id, seat: p.seat })
///     }
///     async fn on_update(&mut self, _: TicketUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let counter = std::sync::atomic::AtomicU32::new(1);
///     let next_id = move || counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
///
///     let (actor, client) = ResourceActor::<Ticket>::new(10, Arc::new(MemoryStore::<Ticket>::new()), next_id);
///     tokio::spawn(actor.run(()));
///
///     let ticket = client.create(TicketCreate { seat: "A1".into() }).await.unwrap();
///     assert_eq!(ticket.seat, "A1");
/// }
/// ```
///
/// # Operations
///
/// * **Create**: load (a read failure fails the request), generate an ID not already in
///   the collection, build the entity, run `on_create`, append, save.
/// * **Get**: load (a read failure degrades to an empty collection), find by ID.
/// * **List**: load (a read failure degrades to an empty collection).
/// * **Update**: load, find, run `on_update`, save, return the new state.
/// * **Delete**: load, find, run `on_delete`, remove, save.
/// * **Clear**: save an empty collection.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Arc<dyn CollectionStore<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `store` - The backend that holds the collection.
    /// * `next_id_fn` - Generates candidate IDs for new records. Candidates already
    ///   present in the collection are skipped, so the function must eventually
    ///   return a fresh value.
    pub fn new(
        buffer_size: usize,
        store: Arc<dyn CollectionStore<T>>,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is passed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Order" instead of "truck_orders::model::order::Order")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let backend = self.store.backend();
        info!(entity_type, backend, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(item) => info!(entity_type, id = %item.id(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self
                        .load_or_empty(entity_type)
                        .await
                        .into_iter()
                        .find(|item| item.id() == id);
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.load_or_empty(entity_type).await;
                    debug!(entity_type, size = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(size) => info!(entity_type, %id, size, "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result.map(|_| ()));
                }
                ResourceRequest::Clear { respond_to } => {
                    debug!(entity_type, "Clear");
                    let result = self.store.save(&[]).await.map_err(FrameworkError::from);
                    match &result {
                        Ok(()) => info!(entity_type, "Cleared"),
                        Err(e) => warn!(entity_type, error = %e, "Clear failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, "Shutdown");
    }

    /// Read path: a failing store is logged and treated as an empty collection.
    async fn load_or_empty(&self, entity_type: &str) -> Vec<T> {
        match self.store.load().await {
            Ok(items) => items,
            Err(e) => {
                warn!(entity_type, error = %e, "Load failed, serving empty collection");
                Vec::new()
            }
        }
    }

    async fn create(&self, params: T::Create, context: &T::Context) -> Result<T, FrameworkError> {
        let mut items = self.store.load().await?;

        let mut id = (self.next_id_fn)();
        while items.iter().any(|item| item.id() == id) {
            id = (self.next_id_fn)();
        }

        let mut item = T::from_create_params(id, params, context).map_err(entity_error)?;
        item.on_create(context).await.map_err(entity_error)?;

        items.push(item.clone());
        self.store.save(&items).await?;
        Ok(item)
    }

    async fn update(
        &self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut items = self.store.load().await?;
        let item = items
            .iter_mut()
            .find(|item| item.id() == *id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        item.on_update(update, context).await.map_err(entity_error)?;
        let updated = item.clone();

        self.store.save(&items).await?;
        Ok(updated)
    }

    /// Returns the collection size after removal.
    async fn delete(&self, id: &T::Id, context: &T::Context) -> Result<usize, FrameworkError> {
        let mut items = self.store.load().await?;
        let position = items
            .iter()
            .position(|item| item.id() == *id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        items[position].on_delete(context).await.map_err(entity_error)?;
        items.retain(|item| item.id() != *id);

        self.store.save(&items).await?;
        Ok(items.len())
    }
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}
