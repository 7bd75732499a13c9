use resource_sync::{
    ModuleClient, OperationRegistry, Store, StoreActor, StoreHandle, Transport,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::clients::{
    BookingClient, ContractClient, InventoryClient, LeadClient, TransactionClient,
};
use crate::config::ConsoleConfig;
use crate::domain::{self, client_for, Domains};
use crate::error::ConsoleError;
use crate::model::{Contact, Developer, Owner, Project, Property};

/// One signed-in console session.
///
/// `EstateConsole` is responsible for:
/// - **Composition**: registering every module in one store, once
/// - **Wiring**: defining the operations and subscribing the store to their events
/// - **Lifecycle**: resetting the session on sign-out and stopping the store task
///
/// # Example
///
/// ```ignore
/// let console = EstateConsole::start(transport, &ConsoleConfig::default())?;
///
/// console.leads.list(json!({"page": 1})).await?;
/// let leads = console.leads.items().await?;
///
/// console.reset_session().await?;
/// console.shutdown().await?;
/// ```
pub struct EstateConsole {
    pub developers: ModuleClient<Developer>,
    pub projects: ModuleClient<Project>,
    pub properties: ModuleClient<Property>,
    pub inventory: InventoryClient,

    pub owners: ModuleClient<Owner>,
    pub contacts: ModuleClient<Contact>,
    pub leads: LeadClient,

    pub tenancy_contracts: ContractClient,
    pub bookings: BookingClient,

    /// General list plus the per-property reports
    pub transactions: TransactionClient,

    store: StoreHandle,
    handle: JoinHandle<()>,
}

impl EstateConsole {
    /// Composes the store, defines every operation and spawns the store task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(
        transport: Arc<dyn Transport>,
        config: &ConsoleConfig,
    ) -> Result<Self, ConsoleError> {
        info!(api_prefix = %config.api_prefix, "Starting console");

        // 1. Compose the store (fails on a duplicate module path)
        let domains = Domains::new(config);
        let store = domains.register(Store::builder())?.build();
        let (actor, store) = StoreActor::new(store);

        // 2. Define operations; the store sees every lifecycle event
        let registry = Arc::new(
            OperationRegistry::builder(transport)
                .define_all(domain::operations(config))?
                .subscribe(Arc::new(store.clone()))
                .build(),
        );
        let handle = tokio::spawn(actor.run());

        // 3. Clients share the registry and the store handle
        let Domains {
            catalog,
            crm,
            leasing,
            finance,
            reports,
        } = &domains;

        Ok(Self {
            developers: ModuleClient::new(
                client_for(&registry, &catalog.developers),
                store.clone(),
            ),
            projects: ModuleClient::new(client_for(&registry, &catalog.projects), store.clone()),
            properties: ModuleClient::new(
                client_for(&registry, &catalog.properties),
                store.clone(),
            ),
            inventory: InventoryClient::new(
                client_for(&registry, &catalog.inventory),
                store.clone(),
            ),
            owners: ModuleClient::new(client_for(&registry, &crm.owners), store.clone()),
            contacts: ModuleClient::new(client_for(&registry, &crm.contacts), store.clone()),
            leads: LeadClient::new(client_for(&registry, &crm.leads), store.clone()),
            tenancy_contracts: ContractClient::new(
                client_for(&registry, &leasing.tenancy_contracts),
                store.clone(),
            ),
            bookings: BookingClient::new(client_for(&registry, &leasing.bookings), store.clone()),
            transactions: TransactionClient::new(
                client_for(&registry, &finance.transactions),
                store.clone(),
                reports.expenses.path.clone(),
                reports.ledger.path.clone(),
            ),
            store,
            handle,
        })
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Sign-out: every module back to its initial state.
    ///
    /// Requests still in flight complete normally but their outcomes are ignored.
    pub async fn reset_session(&self) -> Result<(), ConsoleError> {
        info!("Resetting session");
        self.store.reset().await?;
        Ok(())
    }

    /// Stops the store task and waits for it.
    ///
    /// Clients kept elsewhere fail with `StoreClosed` afterwards.
    pub async fn shutdown(self) -> Result<(), ConsoleError> {
        info!("Shutting down console...");
        self.store.shutdown()?;

        match self.handle.await {
            Ok(()) => {
                info!("Console shut down successfully");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Store task failed");
                Err(ConsoleError::Task(e.to_string()))
            }
        }
    }
}
