use resource_sync::{ResourceEntity, ResourceId};
use serde::{Deserialize, Serialize};

use super::lenient;
use super::Schema;

/// A real-estate developer (builder) in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Developer {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub projects_count: Option<u32>,
}

/// Payload for registering a developer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeveloperCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl ResourceEntity for Developer {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Schema for Developer {
    const RESOURCE: &'static str = "developers";
    const PATH: &'static str = "/developers";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("developer_name", "name"),
        ("contact_number", "phone"),
        ("logo", "logo_url"),
        ("total_projects", "projects_count"),
    ];
}
