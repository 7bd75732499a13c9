//! `crm`: the people around a deal.

use resource_sync::store::StoreBuilder;
use resource_sync::{FrameworkError, ModuleRegistration, OperationDef};

use super::{operations_for, registration};
use crate::config::ConsoleConfig;
use crate::model::{Contact, Lead, Owner};

pub const DOMAIN: &str = "crm";

#[derive(Debug, Clone)]
pub struct Crm {
    pub owners: ModuleRegistration<Owner>,
    pub contacts: ModuleRegistration<Contact>,
    pub leads: ModuleRegistration<Lead>,
}

impl Crm {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            owners: registration(DOMAIN, config),
            contacts: registration(DOMAIN, config),
            leads: registration(DOMAIN, config),
        }
    }

    pub fn register(&self, builder: StoreBuilder) -> Result<StoreBuilder, FrameworkError> {
        builder
            .register(self.owners.clone())?
            .register(self.contacts.clone())?
            .register(self.leads.clone())
    }

    pub fn operations(config: &ConsoleConfig) -> Vec<OperationDef> {
        let mut defs = operations_for::<Owner>(config);
        defs.extend(operations_for::<Contact>(config));
        defs.extend(operations_for::<Lead>(config));
        defs
    }
}
