use resource_sync::{ResourceEntity, ResourceId};
use serde::{Deserialize, Serialize};

use super::Schema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl ResourceEntity for Contact {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Schema for Contact {
    const RESOURCE: &'static str = "contacts";
    const PATH: &'static str = "/contacts";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("full_name", "name"),
        ("phone_number", "phone"),
        ("company_name", "company"),
        ("lead_source", "source"),
    ];
}
