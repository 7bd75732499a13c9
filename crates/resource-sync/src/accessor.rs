//! # Accessor Layer
//!
//! Pure `(state) -> value` functions. Views call these instead of reaching into
//! [`ResourceState`] fields, so the state layout can change without touching
//! every view. Nothing here caches or memoizes.
//!
//! ```rust
//! use resource_sync::accessor;
//! # use resource_sync::{ResourceEntity, ResourceId, ResourceState};
//! # #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
//! # struct Lead { id: ResourceId }
//! # impl ResourceEntity for Lead { fn id(&self) -> &ResourceId { &self.id } }
//! let state = ResourceState::<Lead>::with_per_page(20);
//! assert!(accessor::items(&state).is_empty());
//! assert_eq!(accessor::pagination(&state).per_page, 20);
//! assert!(!accessor::is_loading(&state));
//! ```

use std::collections::BTreeMap;

use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::state::{Canonical, PaginationDescriptor, ResourceState};
use crate::store::{ModulePath, Store};

pub fn items<T>(state: &ResourceState<T>) -> &[Canonical<T>] {
    &state.items
}

pub fn current_item<T>(state: &ResourceState<T>) -> Option<&Canonical<T>> {
    state.current_item.as_ref()
}

pub fn pagination<T>(state: &ResourceState<T>) -> PaginationDescriptor {
    state.pagination
}

pub fn is_loading<T>(state: &ResourceState<T>) -> bool {
    state.is_loading
}

pub fn is_creating<T>(state: &ResourceState<T>) -> bool {
    state.is_creating
}

pub fn is_updating<T>(state: &ResourceState<T>) -> bool {
    state.is_updating
}

pub fn is_deleting<T>(state: &ResourceState<T>) -> bool {
    state.is_deleting
}

pub fn error<T>(state: &ResourceState<T>) -> Option<&str> {
    state.error.as_deref()
}

pub fn validation_errors<T>(state: &ResourceState<T>) -> Option<&BTreeMap<String, String>> {
    state.validation_errors.as_ref()
}

/// Message for one field, if the last create/update rejected it.
pub fn field_error<'a, T>(state: &'a ResourceState<T>, field: &str) -> Option<&'a str> {
    state
        .validation_errors
        .as_ref()
        .and_then(|errors| errors.get(field))
        .map(String::as_str)
}

/// Whether any of the four operation kinds is in flight.
pub fn is_busy<T>(state: &ResourceState<T>) -> bool {
    state.is_loading || state.is_creating || state.is_updating || state.is_deleting
}

/// Looks a module up in the composed store.
pub fn module_state<'a, T: ResourceEntity>(
    store: &'a Store,
    path: &ModulePath,
) -> Result<&'a ResourceState<T>, FrameworkError> {
    store.state::<T>(path)
}
