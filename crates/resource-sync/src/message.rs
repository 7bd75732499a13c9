//! # Store Messages
//!
//! Everything that reaches the [`StoreActor`](crate::actor::StoreActor) goes through
//! one FIFO mailbox. Lifecycle events and reads share it, so a read sent after an
//! event was published always observes that event's mutation.

use std::fmt;
use tokio::sync::oneshot;

use crate::operation::OperationEvent;
use crate::store::Store;

/// A read closure executed inside the actor task against the live store.
pub type ReadFn = Box<dyn FnOnce(&Store) + Send>;

/// Message processed sequentially by the store actor.
pub enum StoreMessage {
    /// A lifecycle event to route to the bound modules.
    Event(OperationEvent),
    /// A read; the closure carries its own response channel.
    Read(ReadFn),
    /// Session reset: every module back to its initial state.
    Reset { respond_to: oneshot::Sender<()> },
    Shutdown,
}

impl fmt::Debug for StoreMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreMessage::Event(event) => f.debug_tuple("Event").field(event).finish(),
            StoreMessage::Read(_) => f.write_str("Read"),
            StoreMessage::Reset { .. } => f.write_str("Reset"),
            StoreMessage::Shutdown => f.write_str("Shutdown"),
        }
    }
}
