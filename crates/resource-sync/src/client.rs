//! # Resource Client
//!
//! The view-facing operations of one module: `list`, `get`, `create`, `update`,
//! `delete` and `update_status`. A client never mutates state itself. It invokes
//! the bound operation through the registry; the store applies the lifecycle
//! events. Awaiting a client call therefore means "the store has seen the outcome".
//!
//! ## Argument conventions
//!
//! | Call | Operation args |
//! |------|----------------|
//! | `list(params)` | `params` (query) |
//! | `get(id)` / `delete(id)` | `{ "id": id }` |
//! | `create(data)` | `{ "data": external(data) }` |
//! | `update(id, data)` | `{ "id": id, "data": external(data) }` |
//! | `update_status(id, status)` | `{ "id": id, "status": status }` |
//!
//! `external(..)` is the module's [`FieldMap::to_external`]: views work with
//! canonical field names, the server receives its own.

use serde::Serialize;
use serde_json::{json, Value};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::field_map::{canonicalize, FieldMap};
use crate::id::ResourceId;
use crate::module::OperationBindings;
use crate::normalize::extract_item;
use crate::operation::OperationKind;
use crate::registry::{Invocation, OperationRegistry};
use crate::state::Canonical;
use crate::store::ModulePath;

/// Typed operations for one module.
///
/// Cheap to clone: the registry is shared.
pub struct ResourceClient<T: ResourceEntity> {
    registry: Arc<OperationRegistry>,
    path: ModulePath,
    bindings: OperationBindings,
    field_map: FieldMap,
    _entity: PhantomData<fn() -> T>,
}

impl<T: ResourceEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            path: self.path.clone(),
            bindings: self.bindings.clone(),
            field_map: self.field_map.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: ResourceEntity> ResourceClient<T> {
    pub fn new(
        registry: Arc<OperationRegistry>,
        path: ModulePath,
        bindings: OperationBindings,
        field_map: FieldMap,
    ) -> Self {
        Self {
            registry,
            path,
            bindings,
            field_map,
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &ModulePath {
        &self.path
    }

    pub fn field_map(&self) -> &FieldMap {
        &self.field_map
    }

    /// Starts the operation bound to `kind` without waiting for its outcome.
    pub fn invoke(&self, kind: OperationKind, args: Value) -> Result<Invocation, FrameworkError> {
        let name = self
            .bindings
            .name_of(kind)
            .ok_or_else(|| FrameworkError::UnboundOperation {
                module: self.path.to_string(),
                kind,
            })?;
        self.registry.invoke(name, args)
    }

    pub async fn list(&self, params: Value) -> Result<(), FrameworkError> {
        self.run(OperationKind::List, params).await.map(drop)
    }

    pub async fn get(&self, id: impl Into<ResourceId>) -> Result<Canonical<T>, FrameworkError> {
        let payload = self
            .run(OperationKind::Get, json!({ "id": id.into().to_value() }))
            .await?;
        self.decode(&payload)
    }

    /// Creates a record from canonical `data`; returns the server's record.
    pub async fn create<D: Serialize>(&self, data: &D) -> Result<Canonical<T>, FrameworkError> {
        let data = self.external(data)?;
        let payload = self.run(OperationKind::Create, json!({ "data": data })).await?;
        self.decode(&payload)
    }

    pub async fn update<D: Serialize>(
        &self,
        id: impl Into<ResourceId>,
        data: &D,
    ) -> Result<(), FrameworkError> {
        let data = self.external(data)?;
        let args = json!({ "id": id.into().to_value(), "data": data });
        self.run(OperationKind::Update, args).await.map(drop)
    }

    pub async fn delete(&self, id: impl Into<ResourceId>) -> Result<(), FrameworkError> {
        let args = json!({ "id": id.into().to_value() });
        self.run(OperationKind::Delete, args).await.map(drop)
    }

    pub async fn update_status<S: Serialize>(
        &self,
        id: impl Into<ResourceId>,
        status: &S,
    ) -> Result<(), FrameworkError> {
        let status =
            serde_json::to_value(status).map_err(|e| FrameworkError::Encode(e.to_string()))?;
        let args = json!({ "id": id.into().to_value(), "status": status });
        self.run(OperationKind::StatusUpdate, args).await.map(drop)
    }

    async fn run(&self, kind: OperationKind, args: Value) -> Result<Arc<Value>, FrameworkError> {
        Ok(self.invoke(kind, args)?.outcome().await?)
    }

    fn external<D: Serialize>(&self, data: &D) -> Result<Value, FrameworkError> {
        let canonical =
            serde_json::to_value(data).map_err(|e| FrameworkError::Encode(e.to_string()))?;
        Ok(self.field_map.to_external(&canonical))
    }

    fn decode(&self, payload: &Value) -> Result<Canonical<T>, FrameworkError> {
        let raw = extract_item(payload).ok_or_else(|| {
            FrameworkError::Decode(format!("{}: response carried no record", self.path))
        })?;
        canonicalize(raw, &self.field_map)
    }
}
