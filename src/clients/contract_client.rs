use async_trait::async_trait;
use resource_sync::{FrameworkError, ModuleFacade, ResourceClient, ResourceId, StoreHandle};
use tracing::{debug, instrument};

use crate::model::{ContractStatus, TenancyContract};

/// Client for the `leasing/tenancy_contracts` module.
#[derive(Clone)]
pub struct ContractClient {
    inner: ResourceClient<TenancyContract>,
    store: StoreHandle,
}

impl ContractClient {
    pub fn new(inner: ResourceClient<TenancyContract>, store: StoreHandle) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl ModuleFacade<TenancyContract> for ContractClient {
    fn inner(&self) -> &ResourceClient<TenancyContract> {
        &self.inner
    }

    fn store(&self) -> &StoreHandle {
        &self.store
    }
}

impl ContractClient {
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: ResourceId,
        status: ContractStatus,
    ) -> Result<(), FrameworkError> {
        debug!("Sending request");
        self.inner.update_status(id, &status).await
    }

    pub async fn activate(&self, id: ResourceId) -> Result<(), FrameworkError> {
        self.update_status(id, ContractStatus::Active).await
    }

    pub async fn terminate(&self, id: ResourceId) -> Result<(), FrameworkError> {
        self.update_status(id, ContractStatus::Terminated).await
    }
}
