use resource_sync::{ResourceEntity, ResourceId};
use serde::{Deserialize, Serialize};

use super::lenient;
use super::status::LeadStatus;
use super::Schema;

/// A prospective buyer or tenant in the sales pipeline.
///
/// Status changes go through `PATCH /leads/{id}/status`; see
/// [`LeadClient::update_status`](crate::clients::LeadClient::update_status).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub status: Option<LeadStatus>,
    #[serde(default)]
    pub assigned_to: Option<ResourceId>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub budget: Option<f64>,
}

/// Payload for capturing a new lead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

impl ResourceEntity for Lead {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Schema for Lead {
    const RESOURCE: &'static str = "leads";
    const PATH: &'static str = "/leads";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("lead_name", "name"),
        ("contact_number", "phone"),
        ("lead_source", "source"),
        ("lead_status", "status"),
        ("agent_id", "assigned_to"),
    ];
    const HAS_STATUS: bool = true;
}
