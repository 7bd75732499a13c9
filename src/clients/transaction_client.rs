//! Transactions: one operation, three views.
//!
//! Every fetch below goes through `transactions/list`. The arguments decide which
//! module keeps the result:
//!
//! - [`TransactionClient::fetch_all`] lands in `finance/transactions`.
//! - [`TransactionClient::fetch_property_expenses`] lands in `reports/expenses`.
//! - [`TransactionClient::fetch_property_ledger`] lands in `reports/ledger`.

use async_trait::async_trait;
use resource_sync::{
    FrameworkError, ModuleFacade, ModulePath, ResourceClient, ResourceId, ResourceState,
    StoreHandle,
};
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

use crate::domain::finance::{PROPERTY_KEY, TYPE_KEY};
use crate::model::{transaction::EXPENSE, Transaction};

#[derive(Clone)]
pub struct TransactionClient {
    inner: ResourceClient<Transaction>,
    store: StoreHandle,
    expenses: ModulePath,
    ledger: ModulePath,
}

impl TransactionClient {
    pub fn new(
        inner: ResourceClient<Transaction>,
        store: StoreHandle,
        expenses: ModulePath,
        ledger: ModulePath,
    ) -> Self {
        Self {
            inner,
            store,
            expenses,
            ledger,
        }
    }
}

#[async_trait]
impl ModuleFacade<Transaction> for TransactionClient {
    fn inner(&self) -> &ResourceClient<Transaction> {
        &self.inner
    }

    fn store(&self) -> &StoreHandle {
        &self.store
    }
}

impl TransactionClient {
    /// One page of the general list. A property filter in `filters` is dropped.
    #[instrument(skip(self, filters))]
    pub async fn fetch_all(
        &self,
        page: u32,
        filters: Map<String, Value>,
    ) -> Result<(), FrameworkError> {
        debug!("Sending request");
        let mut params = filters;
        params.remove(PROPERTY_KEY);
        params.insert("page".to_owned(), Value::from(page));
        self.inner.list(Value::Object(params)).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_property_expenses(
        &self,
        property_id: ResourceId,
    ) -> Result<(), FrameworkError> {
        debug!("Sending request");
        self.inner
            .list(json!({ PROPERTY_KEY: property_id.to_value(), TYPE_KEY: EXPENSE }))
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_property_ledger(
        &self,
        property_id: ResourceId,
    ) -> Result<(), FrameworkError> {
        debug!("Sending request");
        self.inner
            .list(json!({ PROPERTY_KEY: property_id.to_value() }))
            .await
    }

    pub async fn expenses(&self) -> Result<ResourceState<Transaction>, FrameworkError> {
        self.store.snapshot(&self.expenses).await
    }

    pub async fn ledger(&self) -> Result<ResourceState<Transaction>, FrameworkError> {
        self.store.snapshot(&self.ledger).await
    }

    /// Sum of the cached expense amounts; entries without an amount count as zero.
    pub async fn expense_total(&self) -> Result<f64, FrameworkError> {
        self.store
            .read_module(&self.expenses, |state: &ResourceState<Transaction>| {
                state.items.iter().filter_map(|tx| tx.amount).sum()
            })
            .await
    }
}
