use resource_sync::{ResourceEntity, ResourceId};
use serde::{Deserialize, Serialize};

use super::lenient;
use super::status::BookingStatus;
use super::Schema;

/// A reservation of an inventory unit by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: ResourceId,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub unit_id: Option<ResourceId>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default)]
    pub booked_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingCreate {
    pub unit_id: ResourceId,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl ResourceEntity for Booking {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

impl Schema for Booking {
    const RESOURCE: &'static str = "bookings";
    const PATH: &'static str = "/bookings";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("booking_ref", "reference"),
        ("client_name", "customer_name"),
        ("booking_amount", "amount"),
        ("booking_status", "status"),
        ("booking_date", "booked_at"),
    ];
    const HAS_STATUS: bool = true;
}
