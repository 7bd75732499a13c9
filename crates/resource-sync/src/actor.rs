//! # Store Actor
//!
//! The `StoreActor` owns the session [`Store`] inside one Tokio task and processes
//! [`StoreMessage`]s one at a time. Every module mutation therefore happens on a
//! single task, and the mutation for one event is atomic with respect to reads:
//! no lock guards the store.
//!
//! ```text
//! registry task ──notify──▶ StoreHandle ──Event──┐
//! view          ──read────▶ StoreHandle ──Read───┤──▶ mailbox ──▶ StoreActor::run ──▶ Store
//! lifecycle     ──reset───▶ StoreHandle ──Reset──┘
//! ```
//!
//! The mailbox is unbounded: [`EventSubscriber::notify`](crate::registry::EventSubscriber::notify)
//! is synchronous and must never wait for capacity.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::handle::StoreHandle;
use crate::message::StoreMessage;
use crate::store::Store;

/// Owner of the session store.
///
/// # Usage Pattern
///
/// 1. Build the [`Store`] with every module registration.
/// 2. Call `StoreActor::new(store)` to get the actor and its [`StoreHandle`].
/// 3. Spawn `actor.run()` and hand the handle to the registry as a subscriber.
pub struct StoreActor {
    receiver: mpsc::UnboundedReceiver<StoreMessage>,
    store: Store,
}

impl StoreActor {
    pub fn new(store: Store) -> (Self, StoreHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { receiver, store }, StoreHandle::new(sender))
    }

    /// Processes messages until `Shutdown` arrives or every handle is dropped.
    pub async fn run(mut self) {
        info!(modules = self.store.len(), "Store actor started");

        while let Some(message) = self.receiver.recv().await {
            match message {
                StoreMessage::Event(event) => {
                    let applied = self.store.dispatch(&event);
                    debug!(
                        operation = %event.operation,
                        request_id = %event.request_id,
                        applied,
                        "Dispatched"
                    );
                }
                StoreMessage::Read(read) => read(&self.store),
                StoreMessage::Reset { respond_to } => {
                    self.store.reset();
                    let _ = respond_to.send(());
                }
                StoreMessage::Shutdown => break,
            }
        }

        info!(modules = self.store.len(), "Shutdown");
    }
}
