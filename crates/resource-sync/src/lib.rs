//! # Resource Sync
//!
//! The client-side resource state synchronization core: a generic engine that keeps
//! an in-memory cache of server resources consistent with asynchronous network
//! operations, normalizes heterogeneous response envelopes into one canonical model,
//! and lets several independent modules share one operation without corrupting each
//! other's state.
//!
//! ## Architecture Overview
//!
//! ```text
//! view ──▶ ResourceClient::list(..)
//!             │
//!             ▼
//!          OperationRegistry::invoke ──Started──────────────┐
//!             │                                             │
//!             └─spawn─▶ Transport::request                  ▼
//!                          ├─Succeeded(payload) ──▶ StoreHandle (EventSubscriber)
//!                          └─Failed(error) ───────▶        │ mailbox
//!                                                          ▼
//!                                                  StoreActor ──▶ Store::dispatch
//!                                                                  │ by operation name
//!                                                                  ▼
//!                                                   ResourceModule::handle
//!                                                   (scope → bookkeeping → mutation)
//! ```
//!
//! The framework separates concerns into layers:
//!
//! 1. **Data** ([`ResourceEntity`], [`ResourceState`], [`Canonical`]): what a module caches.
//! 2. **Translation** ([`normalize`](mod@normalize), [`FieldMap`]): raw payloads to canonical records.
//! 3. **Lifecycle** ([`OperationRegistry`], [`Transport`]): named operations with the
//!    `Started → Succeeded | Failed` contract.
//! 4. **State** ([`ResourceModule`], [`Store`], [`StoreActor`]): mutation contracts,
//!    scoped projection, the composed namespace tree.
//! 5. **Interface** ([`ResourceClient`], [`ModuleFacade`], [`accessor`]): what views use.
//!
//! ## Wiring a session
//!
//! ```rust
//! use resource_sync::mock::MockTransport;
//! use resource_sync::transport::Method;
//! use resource_sync::{
//!     ModuleClient, ModuleFacade, ModulePath, ModuleRegistration, OperationBindings,
//!     OperationDef, OperationRegistry, ResourceClient, ResourceEntity, ResourceId,
//!     Store, StoreActor,
//! };
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Developer { id: ResourceId, name: String }
//!
//! impl ResourceEntity for Developer {
//!     fn id(&self) -> &ResourceId { &self.id }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let path = ModulePath::new("catalog", "developers");
//!     let bindings = OperationBindings::crud("developers");
//!
//!     // 1. Register modules once
//!     let store = Store::builder()
//!         .register(ModuleRegistration::<Developer>::new(path.clone(), bindings.clone()))
//!         .unwrap()
//!         .build();
//!     let (actor, store_handle) = StoreActor::new(store);
//!     tokio::spawn(actor.run());
//!
//!     // 2. Define operations; the store subscribes to every lifecycle event
//!     let transport = Arc::new(MockTransport::new());
//!     transport
//!         .on(Method::Get, "/developers")
//!         .reply(json!({"data": [{"id": 1, "name": "Emaar"}], "total": 40}));
//!     let registry = OperationRegistry::builder(transport.clone())
//!         .define_all(OperationDef::crud("developers", "/developers"))
//!         .unwrap()
//!         .subscribe(Arc::new(store_handle.clone()))
//!         .build();
//!
//!     // 3. Use it
//!     let developers = ModuleClient::new(
//!         ResourceClient::<Developer>::new(Arc::new(registry), path, bindings, Default::default()),
//!         store_handle,
//!     );
//!     developers.list(json!({})).await.unwrap();
//!     assert_eq!(developers.items().await.unwrap()[0].name, "Emaar");
//!     assert_eq!(developers.pagination().await.unwrap().total_items, 40);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - All module mutation happens on the store actor's task, one event at a time.
//! - The only concurrency is the number of in-flight transport calls.
//! - Ordering is guaranteed within one invocation only. `List` and `Get` use
//!   last-request-wins gating by request id; other kinds always apply.
//!
//! ## Testing
//!
//! [`mock::MockTransport`] replaces the network with queued replies, including
//! deferred replies for forcing out-of-order completion. See the [`mock`] module.

pub mod accessor;
pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod field_map;
pub mod handle;
pub mod id;
pub mod message;
pub mod mock;
pub mod module;
pub mod normalize;
pub mod operation;
pub mod registry;
pub mod scope;
pub mod state;
pub mod store;
pub mod tracing;
pub mod transport;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::ResourceClient;
pub use client_trait::{ModuleClient, ModuleFacade};
pub use entity::ResourceEntity;
pub use error::{FrameworkError, RequestError};
pub use field_map::FieldMap;
pub use handle::StoreHandle;
pub use id::ResourceId;
pub use module::{ModuleRegistration, OperationBindings, ResourceModule};
pub use normalize::{normalize, NormalizedPage, PayloadShape};
pub use operation::{OperationDef, OperationEvent, OperationKind, OperationName, Phase, RequestId};
pub use registry::{EventSubscriber, Invocation, OperationRegistry};
pub use scope::ScopeDescriptor;
pub use state::{Canonical, PaginationDescriptor, ResourceState};
pub use store::{ModulePath, Store};
pub use transport::Transport;
