//! `catalog`: what is being sold or leased.

use resource_sync::store::StoreBuilder;
use resource_sync::{FrameworkError, ModuleRegistration, OperationDef};

use super::{operations_for, registration};
use crate::config::ConsoleConfig;
use crate::model::{Developer, InventoryUnit, Project, Property};

pub const DOMAIN: &str = "catalog";

#[derive(Debug, Clone)]
pub struct Catalog {
    pub developers: ModuleRegistration<Developer>,
    pub projects: ModuleRegistration<Project>,
    pub properties: ModuleRegistration<Property>,
    pub inventory: ModuleRegistration<InventoryUnit>,
}

impl Catalog {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            developers: registration(DOMAIN, config),
            projects: registration(DOMAIN, config),
            properties: registration(DOMAIN, config),
            inventory: registration(DOMAIN, config),
        }
    }

    pub fn register(&self, builder: StoreBuilder) -> Result<StoreBuilder, FrameworkError> {
        builder
            .register(self.developers.clone())?
            .register(self.projects.clone())?
            .register(self.properties.clone())?
            .register(self.inventory.clone())
    }

    pub fn operations(config: &ConsoleConfig) -> Vec<OperationDef> {
        let mut defs = operations_for::<Developer>(config);
        defs.extend(operations_for::<Project>(config));
        defs.extend(operations_for::<Property>(config));
        defs.extend(operations_for::<InventoryUnit>(config));
        defs
    }
}
