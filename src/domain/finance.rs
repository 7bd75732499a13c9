//! `finance`: the general transaction list.
//!
//! `transactions/list` is shared with [`super::reports`]. This module only takes
//! calls without a `propertyId`; property-level calls belong to the reports.

use resource_sync::store::StoreBuilder;
use resource_sync::{FrameworkError, ModuleRegistration, OperationDef, ScopeDescriptor};

use super::{operations_for, registration};
use crate::config::ConsoleConfig;
use crate::model::Transaction;

pub const DOMAIN: &str = "finance";

/// Call argument carrying the property filter.
pub const PROPERTY_KEY: &str = "propertyId";
/// Call argument carrying the transaction type filter.
pub const TYPE_KEY: &str = "type";

#[derive(Debug, Clone)]
pub struct Finance {
    pub transactions: ModuleRegistration<Transaction>,
}

impl Finance {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            transactions: registration(DOMAIN, config)
                .with_scope(ScopeDescriptor::missing(PROPERTY_KEY)),
        }
    }

    pub fn register(&self, builder: StoreBuilder) -> Result<StoreBuilder, FrameworkError> {
        builder.register(self.transactions.clone())
    }

    pub fn operations(config: &ConsoleConfig) -> Vec<OperationDef> {
        operations_for::<Transaction>(config)
    }
}
