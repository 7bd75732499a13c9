use resource_sync::{ResourceEntity, ResourceId};
use serde::{Deserialize, Serialize};

use super::lenient;
use super::Schema;

/// Wire value of [`Transaction::kind`] for expenses.
pub const EXPENSE: &str = "expense";

/// A ledger entry. `property_id` is set for property-level entries.
///
/// The same `transactions/list` operation feeds the general finance view and the
/// per-property report views; see [`crate::domain::reports`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: ResourceId,
    #[serde(default)]
    pub property_id: Option<ResourceId>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind.as_deref() == Some(EXPENSE)
    }
}

impl ResourceEntity for Transaction {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Schema for Transaction {
    const RESOURCE: &'static str = "transactions";
    const PATH: &'static str = "/transactions";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("type", "kind"),
        ("transaction_date", "date"),
        ("expense_category", "category"),
    ];
}
