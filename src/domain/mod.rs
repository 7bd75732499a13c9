//! Store layout: which modules exist, under which namespace, bound to which operations.
//!
//! | Domain | Modules |
//! |--------|---------|
//! | `catalog` | `developers`, `projects`, `properties`, `inventory` |
//! | `crm` | `owners`, `contacts`, `leads` |
//! | `leasing` | `tenancy_contracts`, `bookings` |
//! | `finance` | `transactions` (scope: no `propertyId`) |
//! | `reports` | `expenses`, `ledger` (share `transactions/list`) |

pub mod catalog;
pub mod crm;
pub mod finance;
pub mod leasing;
pub mod reports;

pub use catalog::Catalog;
pub use crm::Crm;
pub use finance::Finance;
pub use leasing::Leasing;
pub use reports::Reports;

use resource_sync::{
    FrameworkError, ModulePath, ModuleRegistration, OperationBindings, OperationDef,
    OperationRegistry, ResourceClient, ResourceEntity,
};
use resource_sync::store::StoreBuilder;
use std::sync::Arc;

use crate::config::ConsoleConfig;
use crate::model::Schema;

/// Standard registration of `T` under `domain`: CRUD bindings (plus status
/// when the resource has one), the entity's field map and the default page size.
pub fn registration<T: Schema>(domain: &str, config: &ConsoleConfig) -> ModuleRegistration<T> {
    let bindings = OperationBindings::crud(T::RESOURCE);
    let bindings = if T::HAS_STATUS {
        bindings.with_status(T::RESOURCE)
    } else {
        bindings
    };
    ModuleRegistration::new(ModulePath::new(domain, T::RESOURCE), bindings)
        .with_per_page(config.default_per_page)
        .with_field_map(T::field_map())
}

/// Operation definitions for `T` under the configured API prefix.
pub fn operations_for<T: Schema>(config: &ConsoleConfig) -> Vec<OperationDef> {
    let path = config.endpoint(T::PATH);
    let mut defs = OperationDef::crud(T::RESOURCE, &path);
    if T::HAS_STATUS {
        defs.push(OperationDef::status(T::RESOURCE, &path));
    }
    defs
}

/// A client driving the module described by `registration`.
pub fn client_for<T: ResourceEntity>(
    registry: &Arc<OperationRegistry>,
    registration: &ModuleRegistration<T>,
) -> ResourceClient<T> {
    ResourceClient::new(
        Arc::clone(registry),
        registration.path.clone(),
        registration.bindings.clone(),
        registration.field_map.clone(),
    )
}

/// Every operation the console defines.
///
/// Reports define nothing of their own: they project `transactions/list`.
pub fn operations(config: &ConsoleConfig) -> Vec<OperationDef> {
    let mut defs = Catalog::operations(config);
    defs.extend(Crm::operations(config));
    defs.extend(Leasing::operations(config));
    defs.extend(Finance::operations(config));
    defs
}

/// All registrations of one session, grouped by domain.
#[derive(Debug, Clone)]
pub struct Domains {
    pub catalog: Catalog,
    pub crm: Crm,
    pub leasing: Leasing,
    pub finance: Finance,
    pub reports: Reports,
}

impl Domains {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            catalog: Catalog::new(config),
            crm: Crm::new(config),
            leasing: Leasing::new(config),
            finance: Finance::new(config),
            reports: Reports::new(config),
        }
    }

    /// Registers every module. Fails on a duplicate path.
    pub fn register(&self, builder: StoreBuilder) -> Result<StoreBuilder, FrameworkError> {
        let builder = self.catalog.register(builder)?;
        let builder = self.crm.register(builder)?;
        let builder = self.leasing.register(builder)?;
        let builder = self.finance.register(builder)?;
        self.reports.register(builder)
    }
}
