//! # Store Handle
//!
//! The cloneable client side of the [`StoreActor`](crate::actor::StoreActor). It is
//! the "composed state handle" threaded through the application by injection:
//! views read with it, the lifecycle resets with it, and the registry publishes
//! lifecycle events into it as an [`EventSubscriber`].

use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::message::StoreMessage;
use crate::operation::OperationEvent;
use crate::registry::EventSubscriber;
use crate::state::ResourceState;
use crate::store::{ModulePath, Store};

#[derive(Clone)]
pub struct StoreHandle {
    sender: mpsc::UnboundedSender<StoreMessage>,
}

impl StoreHandle {
    pub(crate) fn new(sender: mpsc::UnboundedSender<StoreMessage>) -> Self {
        Self { sender }
    }

    /// Runs `f` against the live store inside the actor task.
    pub async fn read<R, F>(&self, f: F) -> Result<R, FrameworkError>
    where
        R: Send + 'static,
        F: FnOnce(&Store) -> R + Send + 'static,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreMessage::Read(Box::new(move |store| {
                let _ = respond_to.send(f(store));
            })))
            .map_err(|_| FrameworkError::StoreClosed)?;
        response.await.map_err(|_| FrameworkError::StoreDropped)
    }

    /// Runs `f` against one module's state.
    pub async fn read_module<T, R, F>(&self, path: &ModulePath, f: F) -> Result<R, FrameworkError>
    where
        T: ResourceEntity,
        R: Send + 'static,
        F: FnOnce(&ResourceState<T>) -> R + Send + 'static,
    {
        let path = path.clone();
        self.read(move |store| store.state::<T>(&path).map(f)).await?
    }

    /// A copy of one module's current state.
    pub async fn snapshot<T: ResourceEntity>(
        &self,
        path: &ModulePath,
    ) -> Result<ResourceState<T>, FrameworkError> {
        self.read_module(path, ResourceState::<T>::clone).await
    }

    /// Restores every module to its initial state; resolves once applied.
    pub async fn reset(&self) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreMessage::Reset { respond_to })
            .map_err(|_| FrameworkError::StoreClosed)?;
        response.await.map_err(|_| FrameworkError::StoreDropped)
    }

    pub fn shutdown(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(StoreMessage::Shutdown)
            .map_err(|_| FrameworkError::StoreClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl EventSubscriber for StoreHandle {
    fn notify(&self, event: &OperationEvent) {
        if self.sender.send(StoreMessage::Event(event.clone())).is_err() {
            warn!(
                operation = %event.operation,
                request_id = %event.request_id,
                "Store closed, event dropped"
            );
        }
    }
}
