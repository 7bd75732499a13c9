use resource_sync::{ResourceEntity, ResourceId};
use serde::{Deserialize, Serialize};

use super::lenient;
use super::Schema;

/// A development project owned by a [`Developer`](super::Developer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub developer_id: Option<ResourceId>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_units: Option<u32>,
    #[serde(default)]
    pub completion_date: Option<String>,
}

impl ResourceEntity for Project {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Schema for Project {
    const RESOURCE: &'static str = "projects";
    const PATH: &'static str = "/projects";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("project_name", "name"),
        ("project_status", "status"),
        ("handover_date", "completion_date"),
    ];
}
