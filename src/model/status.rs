//! Workflow statuses.
//!
//! The backend adds states over time, so every enum has an `Unknown` catch-all
//! instead of failing the whole record.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! status_display {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match serde_json::to_value(self) {
                    Ok(serde_json::Value::String(s)) => f.write_str(&s),
                    _ => f.write_str("unknown"),
                }
            }
        }
    };
}

/// Sales pipeline stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Negotiation,
    Won,
    Lost,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    Active,
    Expired,
    Terminated,
    #[serde(other)]
    Unknown,
}

/// Availability of an inventory unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Available,
    Reserved,
    Booked,
    Sold,
    #[serde(other)]
    Unknown,
}

status_display!(LeadStatus);
status_display!(BookingStatus);
status_display!(ContractStatus);
status_display!(UnitStatus);

impl LeadStatus {
    /// Won and lost leads leave the pipeline.
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl ContractStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Expired | Self::Terminated)
    }
}
