use async_trait::async_trait;
use resource_sync::{
    Canonical, FrameworkError, ModuleFacade, ResourceClient, ResourceId, StoreHandle,
};
use tracing::{debug, instrument};

use crate::model::{Booking, BookingCreate, BookingStatus};

/// Client for the `leasing/bookings` module.
#[derive(Clone)]
pub struct BookingClient {
    inner: ResourceClient<Booking>,
    store: StoreHandle,
}

impl BookingClient {
    pub fn new(inner: ResourceClient<Booking>, store: StoreHandle) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl ModuleFacade<Booking> for BookingClient {
    fn inner(&self) -> &ResourceClient<Booking> {
        &self.inner
    }

    fn store(&self) -> &StoreHandle {
        &self.store
    }
}

impl BookingClient {
    #[instrument(skip(self, booking), fields(unit_id = %booking.unit_id))]
    pub async fn create_booking(
        &self,
        booking: &BookingCreate,
    ) -> Result<Canonical<Booking>, FrameworkError> {
        debug!("Sending request");
        self.inner.create(booking).await
    }

    #[instrument(skip(self))]
    pub async fn confirm(&self, id: ResourceId) -> Result<(), FrameworkError> {
        self.set_status(id, BookingStatus::Confirmed).await
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: ResourceId) -> Result<(), FrameworkError> {
        self.set_status(id, BookingStatus::Cancelled).await
    }

    async fn set_status(
        &self,
        id: ResourceId,
        status: BookingStatus,
    ) -> Result<(), FrameworkError> {
        debug!(%status, "Sending request");
        self.inner.update_status(id, &status).await
    }
}
