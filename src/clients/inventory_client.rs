use async_trait::async_trait;
use resource_sync::{
    Canonical, FrameworkError, ModuleFacade, ResourceClient, ResourceId, ResourceState,
    StoreHandle,
};
use serde_json::json;
use tracing::{debug, instrument};

use crate::model::{InventoryUnit, UnitStatus};

/// Client for the `catalog/inventory` module.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<InventoryUnit>,
    store: StoreHandle,
}

impl InventoryClient {
    pub fn new(inner: ResourceClient<InventoryUnit>, store: StoreHandle) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl ModuleFacade<InventoryUnit> for InventoryClient {
    fn inner(&self) -> &ResourceClient<InventoryUnit> {
        &self.inner
    }

    fn store(&self) -> &StoreHandle {
        &self.store
    }
}

impl InventoryClient {
    /// Lists the units of one property.
    #[instrument(skip(self))]
    pub async fn list_for_property(
        &self,
        property_id: ResourceId,
        page: u32,
    ) -> Result<(), FrameworkError> {
        debug!("Sending request");
        self.inner
            .list(json!({ "property_id": property_id.to_value(), "page": page }))
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: ResourceId,
        status: UnitStatus,
    ) -> Result<(), FrameworkError> {
        debug!("Sending request");
        self.inner.update_status(id, &status).await
    }

    /// Cached units that can still be booked.
    pub async fn available(&self) -> Result<Vec<Canonical<InventoryUnit>>, FrameworkError> {
        self.store
            .read_module(self.inner.path(), |state: &ResourceState<InventoryUnit>| {
                state
                    .items
                    .iter()
                    .filter(|unit| unit.is_available())
                    .cloned()
                    .collect()
            })
            .await
    }
}
