//! # ModuleFacade Trait
//!
//! Provides a common interface for entity-specific clients: operations through a
//! [`ResourceClient`], reads through the [`StoreHandle`]. Implementors supply the
//! two accessors and inherit every standard operation and accessor.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::accessor;
use crate::client::ResourceClient;
use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::handle::StoreHandle;
use crate::id::ResourceId;
use crate::state::{Canonical, PaginationDescriptor, ResourceState};

/// Trait for entity-specific clients to inherit standard operations and reads.
///
/// # Example
///
/// ```rust
/// use resource_sync::{ModuleFacade, ResourceClient, ResourceEntity, ResourceId, StoreHandle};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Owner { id: ResourceId, name: String }
///
/// impl ResourceEntity for Owner {
///     fn id(&self) -> &ResourceId { &self.id }
/// }
///
/// struct OwnerClient {
///     inner: ResourceClient<Owner>,
///     store: StoreHandle,
/// }
///
/// impl ModuleFacade<Owner> for OwnerClient {
///     fn inner(&self) -> &ResourceClient<Owner> { &self.inner }
///     fn store(&self) -> &StoreHandle { &self.store }
/// }
///
/// async fn usage(owners: OwnerClient) {
///     // list(), items() and error() are provided automatically
///     let _ = owners.list(serde_json::json!({"page": 1})).await;
///     let _ = owners.items().await;
///     let _ = owners.error().await;
/// }
/// ```
#[async_trait]
pub trait ModuleFacade<T: ResourceEntity>: Send + Sync {
    /// Access the generic client for this module.
    fn inner(&self) -> &ResourceClient<T>;

    /// Access the session store.
    fn store(&self) -> &StoreHandle;

    /// Fetch a page into `items` / `pagination`.
    #[tracing::instrument(skip(self))]
    async fn list(&self, params: Value) -> Result<(), FrameworkError> {
        tracing::debug!(module = %self.inner().path(), "Sending request");
        self.inner().list(params).await
    }

    /// Fetch one record into `current_item`.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: ResourceId) -> Result<Canonical<T>, FrameworkError> {
        tracing::debug!(module = %self.inner().path(), "Sending request");
        self.inner().get(id).await
    }

    /// Creates a record from canonical `data`; the store prepends it on success.
    #[tracing::instrument(skip(self, data))]
    async fn create<D: Serialize + Sync>(&self, data: &D) -> Result<Canonical<T>, FrameworkError> {
        tracing::debug!(module = %self.inner().path(), "Sending request");
        self.inner().create(data).await
    }

    #[tracing::instrument(skip(self, data))]
    async fn update<D: Serialize + Sync>(
        &self,
        id: ResourceId,
        data: &D,
    ) -> Result<(), FrameworkError> {
        tracing::debug!(module = %self.inner().path(), "Sending request");
        self.inner().update(id, data).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: ResourceId) -> Result<(), FrameworkError> {
        tracing::debug!(module = %self.inner().path(), "Sending request");
        self.inner().delete(id).await
    }

    async fn snapshot(&self) -> Result<ResourceState<T>, FrameworkError> {
        self.store().snapshot(self.inner().path()).await
    }

    async fn items(&self) -> Result<Vec<Canonical<T>>, FrameworkError> {
        self.store()
            .read_module(self.inner().path(), |state: &ResourceState<T>| {
                accessor::items(state).to_vec()
            })
            .await
    }

    async fn current_item(&self) -> Result<Option<Canonical<T>>, FrameworkError> {
        self.store()
            .read_module(self.inner().path(), |state: &ResourceState<T>| {
                accessor::current_item(state).cloned()
            })
            .await
    }

    async fn pagination(&self) -> Result<PaginationDescriptor, FrameworkError> {
        self.store()
            .read_module(self.inner().path(), accessor::pagination::<T>)
            .await
    }

    async fn is_loading(&self) -> Result<bool, FrameworkError> {
        self.store()
            .read_module(self.inner().path(), accessor::is_loading::<T>)
            .await
    }

    async fn is_creating(&self) -> Result<bool, FrameworkError> {
        self.store()
            .read_module(self.inner().path(), accessor::is_creating::<T>)
            .await
    }

    async fn is_updating(&self) -> Result<bool, FrameworkError> {
        self.store()
            .read_module(self.inner().path(), accessor::is_updating::<T>)
            .await
    }

    async fn is_deleting(&self) -> Result<bool, FrameworkError> {
        self.store()
            .read_module(self.inner().path(), accessor::is_deleting::<T>)
            .await
    }

    async fn error(&self) -> Result<Option<String>, FrameworkError> {
        self.store()
            .read_module(self.inner().path(), |state: &ResourceState<T>| {
                accessor::error(state).map(str::to_owned)
            })
            .await
    }

    async fn validation_errors(&self) -> Result<Option<BTreeMap<String, String>>, FrameworkError> {
        self.store()
            .read_module(self.inner().path(), |state: &ResourceState<T>| {
                accessor::validation_errors(state).cloned()
            })
            .await
    }
}

/// The generic facade, for modules that need no entity-specific operations.
pub struct ModuleClient<T: ResourceEntity> {
    inner: ResourceClient<T>,
    store: StoreHandle,
}

impl<T: ResourceEntity> ModuleClient<T> {
    pub fn new(inner: ResourceClient<T>, store: StoreHandle) -> Self {
        Self { inner, store }
    }
}

impl<T: ResourceEntity> Clone for ModuleClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            store: self.store.clone(),
        }
    }
}

impl<T: ResourceEntity> ModuleFacade<T> for ModuleClient<T> {
    fn inner(&self) -> &ResourceClient<T> {
        &self.inner
    }

    fn store(&self) -> &StoreHandle {
        &self.store
    }
}
