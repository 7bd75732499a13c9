//! # Resource State
//!
//! The data a resource module owns. Everything here is plain data: no channels, no
//! handles. Mutation happens in [`module`](crate::module), reads go through
//! [`accessor`](crate::accessor).

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::Deref;

use crate::entity::ResourceEntity;
use crate::id::ResourceId;

/// Describes the page of a list that is currently loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDescriptor {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub per_page: u32,
}

impl PaginationDescriptor {
    /// Pagination for a response that carried no pagination fields at all.
    pub fn defaults_for(item_count: usize, per_page: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: item_count as u64,
            per_page,
        }
    }
}

/// A canonical record together with the untransformed upstream record.
///
/// `raw` is the escape hatch for consumers that need an original value the
/// field map does not carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Canonical<T> {
    #[serde(flatten)]
    pub value: T,
    #[serde(rename = "_raw")]
    pub raw: Value,
}

impl<T: ResourceEntity> Canonical<T> {
    pub fn new(value: T, raw: Value) -> Self {
        Self { value, raw }
    }

    pub fn id(&self) -> &ResourceId {
        self.value.id()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Canonical<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

/// State of one resource module.
///
/// The four loading flags are independent: a list refresh and a row delete may be
/// in flight at the same time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceState<T> {
    pub items: Vec<Canonical<T>>,
    pub current_item: Option<Canonical<T>>,
    pub pagination: PaginationDescriptor,
    pub is_loading: bool,
    pub is_creating: bool,
    pub is_updating: bool,
    pub is_deleting: bool,
    pub error: Option<String>,
    pub validation_errors: Option<BTreeMap<String, String>>,
}

impl<T> ResourceState<T> {
    /// Empty state whose `per_page` is the module default used by the normalizer.
    pub fn with_per_page(per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            current_item: None,
            pagination: PaginationDescriptor {
                per_page,
                ..PaginationDescriptor::default()
            },
            is_loading: false,
            is_creating: false,
            is_updating: false,
            is_deleting: false,
            error: None,
            validation_errors: None,
        }
    }

    pub fn default_per_page(&self) -> u32 {
        self.pagination.per_page
    }
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self::with_per_page(10)
    }
}

impl<T: ResourceEntity> ResourceState<T> {
    pub fn position_of(&self, id: &ResourceId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn find(&self, id: &ResourceId) -> Option<&Canonical<T>> {
        self.items.iter().find(|item| item.id() == id)
    }
}
