use resource_sync::{ResourceEntity, ResourceId};
use serde::{Deserialize, Serialize};

use super::lenient;
use super::status::ContractStatus;
use super::Schema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenancyContract {
    pub id: ResourceId,
    #[serde(default)]
    pub contract_number: String,
    #[serde(default)]
    pub property_id: Option<ResourceId>,
    #[serde(default)]
    pub tenant_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub rent_amount: Option<f64>,
    #[serde(default)]
    pub status: Option<ContractStatus>,
}

impl ResourceEntity for TenancyContract {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Schema for TenancyContract {
    const RESOURCE: &'static str = "tenancy_contracts";
    const PATH: &'static str = "/tenancy-contracts";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("contract_no", "contract_number"),
        ("tenant", "tenant_name"),
        ("annual_rent", "rent_amount"),
        ("contract_status", "status"),
    ];
    const HAS_STATUS: bool = true;
}
