use resource_sync::{ResourceEntity, ResourceId};
use serde::{Deserialize, Serialize};

use super::lenient;
use super::Schema;

/// A property owner (landlord).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub properties_count: Option<u32>,
}

impl ResourceEntity for Owner {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Schema for Owner {
    const RESOURCE: &'static str = "owners";
    const PATH: &'static str = "/owners";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("owner_name", "name"),
        ("mobile", "phone"),
        ("total_properties", "properties_count"),
    ];
}
