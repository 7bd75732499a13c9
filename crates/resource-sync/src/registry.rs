//! # Async Operation Registry
//!
//! The registry owns the table of named operations and the transport. Invoking an
//! operation produces the three-phase lifecycle:
//!
//! ```text
//! invoke(name, args)
//!   ├─ Started            (emitted synchronously, before invoke returns)
//!   └─ spawn ─ transport.request(..)
//!                 ├─ Succeeded(payload)
//!                 └─ Failed(error)      (exactly one of the two)
//! ```
//!
//! Each event goes to every [`EventSubscriber`] first (the store), then to the
//! invocation's own observer ([`Invocation`]). A view that awaits
//! [`Invocation::outcome`] and then reads the store therefore sees the mutation.
//!
//! There is no ordering between two invocations: a later call may finish first.
//! There is no cancellation or timeout; that belongs to the transport.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{FrameworkError, RequestError};
use crate::operation::{OperationDef, OperationEvent, OperationName, Phase, RequestId};
use crate::transport::{Payload, RequestOptions, Transport};

/// Receives every lifecycle event of every invocation.
///
/// `notify` must not block: it is called from inside `invoke` and from the
/// transport task.
pub trait EventSubscriber: Send + Sync + 'static {
    fn notify(&self, event: &OperationEvent);
}

/// Builder for [`OperationRegistry`].
pub struct RegistryBuilder {
    transport: Arc<dyn Transport>,
    operations: HashMap<OperationName, OperationDef>,
    subscribers: Vec<Arc<dyn EventSubscriber>>,
}

impl RegistryBuilder {
    pub fn define(mut self, def: OperationDef) -> Result<Self, FrameworkError> {
        if self.operations.contains_key(&def.name) {
            return Err(FrameworkError::DuplicateOperation(def.name.to_string()));
        }
        self.operations.insert(def.name.clone(), def);
        Ok(self)
    }

    pub fn define_all(
        self,
        defs: impl IntoIterator<Item = OperationDef>,
    ) -> Result<Self, FrameworkError> {
        defs.into_iter().try_fold(self, |builder, def| builder.define(def))
    }

    pub fn subscribe(mut self, subscriber: Arc<dyn EventSubscriber>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    pub fn build(self) -> OperationRegistry {
        info!(
            operations = self.operations.len(),
            subscribers = self.subscribers.len(),
            "Registry ready"
        );
        OperationRegistry {
            transport: self.transport,
            operations: self.operations,
            subscribers: self.subscribers.into(),
            next_request_id: AtomicU64::new(1),
        }
    }
}

/// Table of named asynchronous operations bound to one transport.
pub struct OperationRegistry {
    transport: Arc<dyn Transport>,
    operations: HashMap<OperationName, OperationDef>,
    subscribers: Arc<[Arc<dyn EventSubscriber>]>,
    next_request_id: AtomicU64,
}

impl OperationRegistry {
    pub fn builder(transport: Arc<dyn Transport>) -> RegistryBuilder {
        RegistryBuilder {
            transport,
            operations: HashMap::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn operation(&self, name: &OperationName) -> Option<&OperationDef> {
        self.operations.get(name)
    }

    /// Starts one invocation of `name`.
    ///
    /// Must be called from within a Tokio runtime: the transport call runs on a
    /// spawned task.
    pub fn invoke(&self, name: &OperationName, args: Value) -> Result<Invocation, FrameworkError> {
        let def = self
            .operations
            .get(name)
            .cloned()
            .ok_or_else(|| FrameworkError::UnknownOperation(name.to_string()))?;

        let request_id = RequestId(self.next_request_id.fetch_add(1, Ordering::SeqCst));
        let (observer, events) = mpsc::unbounded_channel();
        let started = OperationEvent::started(def.name.clone(), request_id, Arc::new(args));

        debug!(operation = %def.name, %request_id, args = %started.args, "Started");
        publish(&self.subscribers, &observer, &started);

        let transport = Arc::clone(&self.transport);
        let subscribers = Arc::clone(&self.subscribers);
        tokio::spawn(async move {
            let phase = match execute(transport.as_ref(), &def, &started).await {
                Ok(payload) => {
                    info!(operation = %def.name, %request_id, "Succeeded");
                    Phase::Succeeded(Arc::new(payload))
                }
                Err(e) => {
                    warn!(operation = %def.name, %request_id, error = %e, "Failed");
                    Phase::Failed(e)
                }
            };
            publish(&subscribers, &observer, &started.with_phase(phase));
        });

        Ok(Invocation {
            operation: name.clone(),
            request_id,
            events,
        })
    }
}

async fn execute(
    transport: &dyn Transport,
    def: &OperationDef,
    started: &OperationEvent,
) -> Result<Value, RequestError> {
    let (path, remaining) = def.render(&started.args)?;
    let payload = Payload::from_args(def.method, remaining);
    let options = RequestOptions {
        operation: def.name.clone(),
        request_id: started.request_id,
    };
    transport.request(def.method, &path, payload, &options).await
}

fn publish(
    subscribers: &[Arc<dyn EventSubscriber>],
    observer: &mpsc::UnboundedSender<OperationEvent>,
    event: &OperationEvent,
) {
    for subscriber in subscribers {
        subscriber.notify(event);
    }
    // The caller may have dropped its Invocation; the store still gets the event.
    let _ = observer.send(event.clone());
}

/// The observable side of one invocation.
pub struct Invocation {
    operation: OperationName,
    request_id: RequestId,
    events: mpsc::UnboundedReceiver<OperationEvent>,
}

impl Invocation {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn operation(&self) -> &OperationName {
        &self.operation
    }

    /// Next lifecycle event, `None` once the terminal event has been consumed.
    pub async fn next_event(&mut self) -> Option<OperationEvent> {
        self.events.recv().await
    }

    /// Waits for the terminal event.
    pub async fn outcome(mut self) -> Result<Arc<Value>, RequestError> {
        while let Some(event) = self.events.recv().await {
            match event.phase {
                Phase::Started => continue,
                Phase::Succeeded(payload) => return Ok(payload),
                Phase::Failed(e) => return Err(e),
            }
        }
        Err(RequestError::Unknown(format!(
            "{} ended without an outcome",
            self.operation
        )))
    }
}
