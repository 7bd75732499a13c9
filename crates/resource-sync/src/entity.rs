//! # ResourceEntity Trait
//!
//! The `ResourceEntity` trait is the contract every canonical model (Developer,
//! Lead, Transaction, …) implements so a generic [`ResourceModule`](crate::module::ResourceModule)
//! can cache it. The module logic is written *once* against this trait; each entity
//! only contributes its shape (via serde) and how to find its id.
//!
//! # Architecture Note
//! Entities are the *internal* model. They never see upstream field names: the
//! module runs the raw record through the entity's [`FieldMap`](crate::field_map::FieldMap)
//! first and deserializes the translated object. Keeping translation out of the
//! entity means one serde derive per model and no hand-written mapping code.
//!
//! # Provided Items
//! - [`ResourceEntity::STATUS_FIELD`]: the canonical key that a status update writes
//!   when the server does not echo the updated record back. Defaults to `"status"`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use crate::id::ResourceId;

/// Trait that any canonical model must implement to be cached by a resource module.
pub trait ResourceEntity:
    Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Canonical key holding the entity status, used for local status merges.
    const STATUS_FIELD: &'static str = "status";

    /// The identifier used for de-duplication and update/delete reconciliation.
    fn id(&self) -> &ResourceId;
}
