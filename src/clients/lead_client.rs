use async_trait::async_trait;
use resource_sync::{
    Canonical, FrameworkError, ModuleFacade, ResourceClient, ResourceId, ResourceState,
    StoreHandle,
};
use tracing::{debug, instrument};

use crate::model::{Lead, LeadCreate, LeadStatus, LeadUpdate};

/// Client for the `crm/leads` module.
#[derive(Clone)]
pub struct LeadClient {
    inner: ResourceClient<Lead>,
    store: StoreHandle,
}

impl LeadClient {
    pub fn new(inner: ResourceClient<Lead>, store: StoreHandle) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl ModuleFacade<Lead> for LeadClient {
    fn inner(&self) -> &ResourceClient<Lead> {
        &self.inner
    }

    fn store(&self) -> &StoreHandle {
        &self.store
    }
}

impl LeadClient {
    #[instrument(skip(self, lead), fields(name = %lead.name))]
    pub async fn create_lead(&self, lead: &LeadCreate) -> Result<Canonical<Lead>, FrameworkError> {
        debug!("Sending request");
        self.inner.create(lead).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_lead(
        &self,
        id: ResourceId,
        update: &LeadUpdate,
    ) -> Result<(), FrameworkError> {
        debug!("Sending request");
        self.inner.update(id, update).await
    }

    /// Moves a lead through the pipeline. The server does not echo the record;
    /// the cached lead is patched in place.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: ResourceId,
        status: LeadStatus,
    ) -> Result<(), FrameworkError> {
        debug!("Sending request");
        self.inner.update_status(id, &status).await
    }

    /// Cached leads still in the pipeline.
    pub async fn open_leads(&self) -> Result<Vec<Canonical<Lead>>, FrameworkError> {
        self.store
            .read_module(self.inner.path(), |state: &ResourceState<Lead>| {
                state
                    .items
                    .iter()
                    .filter(|lead| !lead.status.is_some_and(LeadStatus::is_closed))
                    .cloned()
                    .collect()
            })
            .await
    }
}
