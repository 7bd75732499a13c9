//! `leasing`: contracts and bookings.

use resource_sync::store::StoreBuilder;
use resource_sync::{FrameworkError, ModuleRegistration, OperationDef};

use super::{operations_for, registration};
use crate::config::ConsoleConfig;
use crate::model::{Booking, TenancyContract};

pub const DOMAIN: &str = "leasing";

#[derive(Debug, Clone)]
pub struct Leasing {
    pub tenancy_contracts: ModuleRegistration<TenancyContract>,
    pub bookings: ModuleRegistration<Booking>,
}

impl Leasing {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            tenancy_contracts: registration(DOMAIN, config),
            bookings: registration(DOMAIN, config),
        }
    }

    pub fn register(&self, builder: StoreBuilder) -> Result<StoreBuilder, FrameworkError> {
        builder
            .register(self.tenancy_contracts.clone())?
            .register(self.bookings.clone())
    }

    pub fn operations(config: &ConsoleConfig) -> Vec<OperationDef> {
        let mut defs = operations_for::<TenancyContract>(config);
        defs.extend(operations_for::<Booking>(config));
        defs
    }
}
