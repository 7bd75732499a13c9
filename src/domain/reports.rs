//! `reports`: per-property projections of `transactions/list`.
//!
//! Both modules bind only the list operation and accept a call only when its
//! arguments match their scope:
//!
//! | Module | Scope |
//! |--------|-------|
//! | `reports/expenses` | `propertyId` present and `type == "expense"` |
//! | `reports/ledger` | `propertyId` present and `type != "expense"` |
//!
//! Together with the `finance/transactions` scope every list call lands in
//! exactly one module.
//!
//! The scopes check that `propertyId` is present, not which property it names,
//! so each module holds one property's view at a time. Two overlapping fetches
//! for different properties land in the same module and the later request wins:
//! the earlier one's outcome is discarded as superseded.

use resource_sync::operation::operation_name;
use resource_sync::store::StoreBuilder;
use resource_sync::{
    FrameworkError, ModulePath, ModuleRegistration, OperationBindings, OperationKind,
    ScopeDescriptor,
};

use super::finance::{PROPERTY_KEY, TYPE_KEY};
use crate::config::ConsoleConfig;
use crate::model::{transaction::EXPENSE, Schema, Transaction};

pub const DOMAIN: &str = "reports";

#[derive(Debug, Clone)]
pub struct Reports {
    pub expenses: ModuleRegistration<Transaction>,
    pub ledger: ModuleRegistration<Transaction>,
}

impl Reports {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            expenses: report("expenses", config).with_scope(
                ScopeDescriptor::has(PROPERTY_KEY)
                    .and(ScopeDescriptor::equals(TYPE_KEY, EXPENSE)),
            ),
            ledger: report("ledger", config).with_scope(
                ScopeDescriptor::has(PROPERTY_KEY)
                    .and(ScopeDescriptor::not_equals(TYPE_KEY, EXPENSE)),
            ),
        }
    }

    pub fn register(&self, builder: StoreBuilder) -> Result<StoreBuilder, FrameworkError> {
        builder
            .register(self.expenses.clone())?
            .register(self.ledger.clone())
    }
}

fn report(name: &str, config: &ConsoleConfig) -> ModuleRegistration<Transaction> {
    let list = operation_name(Transaction::RESOURCE, OperationKind::List);
    ModuleRegistration::new(
        ModulePath::new(DOMAIN, name),
        OperationBindings::new().bind(list, OperationKind::List),
    )
    .with_per_page(config.report_per_page)
    .with_field_map(Transaction::field_map())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Finance;
    use serde_json::json;

    #[test]
    fn test_list_calls_land_in_exactly_one_module() {
        let config = ConsoleConfig::default();
        let reports = Reports::new(&config);
        let finance = Finance::new(&config);
        let scopes = [
            finance.transactions.scope.clone().unwrap_or_default(),
            reports.expenses.scope.clone().unwrap_or_default(),
            reports.ledger.scope.clone().unwrap_or_default(),
        ];

        for (args, owner) in [
            (json!({"page": 2}), 0),
            (json!({"propertyId": 7, "type": "expense"}), 1),
            (json!({"propertyId": "7"}), 2),
            (json!({"propertyId": 7, "type": "income"}), 2),
            (json!({"propertyId": null, "type": "expense"}), 0),
        ] {
            let matched: Vec<_> = scopes
                .iter()
                .enumerate()
                .filter(|(_, scope)| scope.matches(&args))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(matched, vec![owner], "args {args}");
        }
    }

    #[test]
    fn test_reports_use_report_page_size() {
        let reports = Reports::new(&ConsoleConfig::default());
        assert_eq!(reports.expenses.initial_state.pagination.per_page, 50);
        assert_eq!(reports.ledger.path.to_string(), "reports/ledger");
    }
}
