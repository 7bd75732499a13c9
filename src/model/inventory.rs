use resource_sync::{ResourceEntity, ResourceId};
use serde::{Deserialize, Serialize};

use super::lenient;
use super::status::UnitStatus;
use super::Schema;

/// One sellable or leasable unit of a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryUnit {
    pub id: ResourceId,
    #[serde(default)]
    pub unit_number: String,
    #[serde(default)]
    pub property_id: Option<ResourceId>,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<UnitStatus>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price: Option<f64>,
}

impl InventoryUnit {
    pub fn is_available(&self) -> bool {
        self.status == Some(UnitStatus::Available)
    }
}

impl ResourceEntity for InventoryUnit {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Schema for InventoryUnit {
    const RESOURCE: &'static str = "inventory";
    const PATH: &'static str = "/inventory";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("unit_no", "unit_number"),
        ("unit_status", "status"),
        ("unit_type", "kind"),
        ("floor_no", "floor"),
    ];
    const HAS_STATUS: bool = true;
}
