//! # Response Normalizer
//!
//! The console talks to endpoints that disagree about envelopes. The same list may
//! come back as any of:
//!
//! ```text
//! [ {..}, {..} ]                                              FlatArray
//! { "data": [ {..} ], "current_page": 1, "total": 120, .. }   NestedPage
//! { "data": { "data": [ {..} ], "current_page": 1, .. } }     DoubleNestedPage
//! { "data": { "id": 9, .. } }                                 SingleItem
//! ```
//!
//! [`classify`] turns a raw payload into a [`PayloadShape`] (deepest array wins:
//! `raw.data.data`, then `raw.data`, then `raw`), and [`normalize`] extracts the
//! canonical `{ items, pagination }` pair from it.
//!
//! Pagination keys are read from the envelope that holds the array, falling back
//! to a `meta` object inside it. Numbers may arrive as numeric strings.

use serde_json::{Map, Value};

use crate::state::PaginationDescriptor;

/// The recognized payload envelopes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayloadShape<'a> {
    FlatArray(&'a [Value]),
    NestedPage {
        items: &'a [Value],
        envelope: &'a Map<String, Value>,
    },
    DoubleNestedPage {
        items: &'a [Value],
        envelope: &'a Map<String, Value>,
    },
    SingleItem(&'a Value),
    Unrecognized,
}

impl PayloadShape<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            PayloadShape::FlatArray(_) => "flat_array",
            PayloadShape::NestedPage { .. } => "nested_page",
            PayloadShape::DoubleNestedPage { .. } => "double_nested_page",
            PayloadShape::SingleItem(_) => "single_item",
            PayloadShape::Unrecognized => "unrecognized",
        }
    }
}

/// Canonical list extraction result.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPage {
    pub items: Vec<Value>,
    pub pagination: PaginationDescriptor,
}

pub fn classify(raw: &Value) -> PayloadShape<'_> {
    let data = raw.get("data");

    if let Some(Value::Object(envelope)) = data {
        if let Some(Value::Array(items)) = envelope.get("data") {
            return PayloadShape::DoubleNestedPage {
                items: items.as_slice(),
                envelope,
            };
        }
    }
    if let (Some(Value::Array(items)), Value::Object(envelope)) = (data, raw) {
        return PayloadShape::NestedPage {
            items: items.as_slice(),
            envelope,
        };
    }
    if let Value::Array(items) = raw {
        return PayloadShape::FlatArray(items.as_slice());
    }
    if let Some(item @ Value::Object(_)) = data {
        return PayloadShape::SingleItem(item);
    }
    PayloadShape::Unrecognized
}

/// Extracts `{ items, pagination }` from any recognized payload.
///
/// `default_per_page` fills `per_page` when the payload does not carry it.
/// An unrecognized payload yields no items and all-zero pagination.
pub fn normalize(raw: &Value, default_per_page: u32) -> NormalizedPage {
    match classify(raw) {
        PayloadShape::FlatArray(items) => NormalizedPage {
            items: items.to_vec(),
            pagination: PaginationDescriptor::defaults_for(items.len(), default_per_page),
        },
        PayloadShape::NestedPage { items, envelope }
        | PayloadShape::DoubleNestedPage { items, envelope } => NormalizedPage {
            items: items.to_vec(),
            pagination: pagination_from(envelope, items.len(), default_per_page),
        },
        PayloadShape::SingleItem(item) => NormalizedPage {
            items: vec![item.clone()],
            pagination: PaginationDescriptor::defaults_for(1, default_per_page),
        },
        PayloadShape::Unrecognized => NormalizedPage {
            items: Vec::new(),
            pagination: PaginationDescriptor::default(),
        },
    }
}

/// Extracts the single record of a get/create/update response.
///
/// Accepts `{ "data": { .. } }` or a bare record object that carries an `id`.
pub fn extract_item(raw: &Value) -> Option<&Value> {
    match classify(raw) {
        PayloadShape::SingleItem(item) => Some(item),
        PayloadShape::Unrecognized if raw.get("id").is_some() => Some(raw),
        _ => None,
    }
}

fn pagination_from(
    envelope: &Map<String, Value>,
    item_count: usize,
    default_per_page: u32,
) -> PaginationDescriptor {
    let meta = envelope.get("meta").and_then(Value::as_object);
    let lookup = |keys: &[&str]| {
        read_number(envelope, keys).or_else(|| meta.and_then(|m| read_number(m, keys)))
    };

    let total_items = lookup(&["total", "total_items", "totalItems"])
        .unwrap_or(item_count as u64)
        .max(item_count as u64);

    PaginationDescriptor {
        current_page: lookup(&["current_page", "currentPage"]).map_or(1, clamp_u32),
        total_pages: lookup(&["last_page", "lastPage", "total_pages", "totalPages"])
            .map_or(1, clamp_u32),
        total_items,
        per_page: lookup(&["per_page", "perPage"]).map_or(default_per_page, clamp_u32),
    }
}

fn read_number(map: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| map.get(*key).and_then(lenient_u64))
}

fn lenient_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn clamp_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_array_uses_defaults() {
        let page = normalize(&json!([{"id": 2}]), 25);
        assert_eq!(page.items, vec![json!({"id": 2})]);
        assert_eq!(
            page.pagination,
            PaginationDescriptor {
                current_page: 1,
                total_pages: 1,
                total_items: 1,
                per_page: 25
            }
        );
    }

    #[test]
    fn test_nested_page_reads_top_level_pagination() {
        let raw = json!({
            "data": [{"id": 1, "name": "A"}],
            "current_page": 1,
            "last_page": 3,
            "total": 120,
            "per_page": 50
        });
        assert!(matches!(classify(&raw), PayloadShape::NestedPage { .. }));

        let page = normalize(&raw, 10);
        assert_eq!(page.items, vec![json!({"id": 1, "name": "A"})]);
        assert_eq!(
            page.pagination,
            PaginationDescriptor {
                current_page: 1,
                total_pages: 3,
                total_items: 120,
                per_page: 50
            }
        );
    }

    #[test]
    fn test_nested_page_without_pagination_defaults_per_field() {
        let page = normalize(&json!({"data": [{"id": 1}, {"id": 2}], "total": "40"}), 15);
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.total_items, 40);
        assert_eq!(page.pagination.per_page, 15);
    }

    #[test]
    fn test_nested_page_falls_back_to_meta() {
        let raw = json!({
            "data": [{"id": 1}],
            "meta": {"current_page": 2, "last_page": 4, "total": 31, "per_page": 10}
        });
        let page = normalize(&raw, 25);
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.total_pages, 4);
        assert_eq!(page.pagination.total_items, 31);
        assert_eq!(page.pagination.per_page, 10);
    }

    #[test]
    fn test_double_nested_page_prefers_inner_array() {
        let raw = json!({
            "data": {
                "data": [{"id": 5}, {"id": 6}],
                "current_page": "2",
                "last_page": 7,
                "total": 130,
                "per_page": 20
            }
        });
        assert!(matches!(classify(&raw), PayloadShape::DoubleNestedPage { .. }));

        let page = normalize(&raw, 10);
        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.pagination,
            PaginationDescriptor {
                current_page: 2,
                total_pages: 7,
                total_items: 130,
                per_page: 20
            }
        );
    }

    #[test]
    fn test_single_item() {
        let raw = json!({"data": {"id": 9, "name": "New"}});
        assert_eq!(classify(&raw), PayloadShape::SingleItem(&raw["data"]));
        assert_eq!(classify(&raw).name(), "single_item");
        assert_eq!(extract_item(&raw), Some(&json!({"id": 9, "name": "New"})));

        let page = normalize(&raw, 10);
        assert_eq!(page.items, vec![json!({"id": 9, "name": "New"})]);
        assert_eq!(page.pagination.total_items, 1);
    }

    #[test]
    fn test_unrecognized_yields_empty_zero_page() {
        assert_eq!(classify(&json!({"ok": true})).name(), "unrecognized");
        let page = normalize(&json!({"message": "ok"}), 10);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination, PaginationDescriptor::default());

        assert_eq!(normalize(&json!(null), 10).items.len(), 0);
        assert_eq!(normalize(&json!({"data": "nope"}), 10).items.len(), 0);
    }

    #[test]
    fn test_extract_item_accepts_bare_records_only_with_id() {
        let bare = json!({"id": 4, "name": "Bare"});
        assert_eq!(extract_item(&bare), Some(&bare));
        assert_eq!(extract_item(&json!({"message": "Updated"})), None);
        assert_eq!(extract_item(&json!([{"id": 1}])), None);
    }

    #[test]
    fn test_total_never_below_loaded_items() {
        let page = normalize(&json!({"data": [{"id": 1}, {"id": 2}], "total": 0}), 10);
        assert_eq!(page.pagination.total_items, 2);
    }
}
