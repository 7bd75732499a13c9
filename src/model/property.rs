use resource_sync::{ResourceEntity, ResourceId};
use serde::{Deserialize, Serialize};

use super::lenient;
use super::Schema;

/// A listed property: villa, apartment, office, plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: ResourceId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub project_id: Option<ResourceId>,
    #[serde(default)]
    pub owner_id: Option<ResourceId>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub bedrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub area_sqft: Option<f64>,
}

impl ResourceEntity for Property {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Schema for Property {
    const RESOURCE: &'static str = "properties";
    const PATH: &'static str = "/properties";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("property_name", "title"),
        ("type", "kind"),
        ("area", "area_sqft"),
        ("asking_price", "price"),
    ];
}
