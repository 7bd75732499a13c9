//! Entity-specific clients.
//!
//! Modules without extra operations use the generic
//! [`ModuleClient`](resource_sync::ModuleClient) directly.

pub mod booking_client;
pub mod contract_client;
pub mod inventory_client;
pub mod lead_client;
pub mod transaction_client;

pub use booking_client::BookingClient;
pub use contract_client::ContractClient;
pub use inventory_client::InventoryClient;
pub use lead_client::LeadClient;
pub use transaction_client::TransactionClient;
