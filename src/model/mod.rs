//! Canonical entity models of the console.
//!
//! Every model is the *internal* shape. Upstream field names are declared once per
//! entity in its [`Schema::FIELDS`] table and translated by the framework's
//! [`FieldMap`]; the model itself only derives serde.

pub mod booking;
pub mod contact;
pub mod developer;
pub mod inventory;
pub mod lead;
pub mod lenient;
pub mod owner;
pub mod project;
pub mod property;
pub mod status;
pub mod tenancy_contract;
pub mod transaction;

pub use booking::*;
pub use contact::*;
pub use developer::*;
pub use inventory::*;
pub use lead::*;
pub use owner::*;
pub use project::*;
pub use property::*;
pub use status::*;
pub use tenancy_contract::*;
pub use transaction::*;

use resource_sync::{FieldMap, ResourceEntity};

/// How an entity is exposed by the backend.
pub trait Schema: ResourceEntity {
    /// Resource name, used for operation names (`"<resource>/list"`) and module names.
    const RESOURCE: &'static str;
    /// Collection path below the API prefix.
    const PATH: &'static str;
    /// `(external, internal)` field pairs.
    const FIELDS: &'static [(&'static str, &'static str)];
    /// Whether the backend exposes `PATCH <path>/{id}/status`.
    const HAS_STATUS: bool = false;

    fn field_map() -> FieldMap {
        FieldMap::new(Self::FIELDS)
    }
}
