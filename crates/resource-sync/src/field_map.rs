//! # Field Maps
//!
//! Upstream field names rarely match the canonical model (`developer_name` vs
//! `name`, `lead_status` vs `status`). Each entity declares one static table of
//! `(external, internal)` pairs and this module does the translation in both
//! directions:
//!
//! - [`FieldMap::to_internal`] for every record coming back from the server.
//! - [`FieldMap::to_external`] for request bodies built from canonical data.
//!
//! Keys without an entry pass through untouched. When a raw record carries both an
//! external key and a same-named internal key, the mapped value wins.

use serde_json::{Map, Value};

use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::state::Canonical;

/// Declarative external→internal key table for one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(&'static str, &'static str)>,
}

impl FieldMap {
    pub fn new(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }

    /// A map that translates nothing.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn internal_name(&self, external: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(ext, _)| *ext == external)
            .map(|(_, int)| *int)
    }

    pub fn external_name(&self, internal: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, int)| *int == internal)
            .map(|(ext, _)| *ext)
    }

    pub fn to_internal(&self, raw: &Value) -> Value {
        self.rename(raw, |key| self.internal_name(key))
    }

    pub fn to_external(&self, canonical: &Value) -> Value {
        self.rename(canonical, |key| self.external_name(key))
    }

    fn rename(&self, value: &Value, lookup: impl Fn(&str) -> Option<&'static str>) -> Value {
        let Value::Object(source) = value else {
            return value.clone();
        };

        let mut out = Map::with_capacity(source.len());
        // Pass-through first so renamed keys overwrite collisions.
        for (key, v) in source {
            if lookup(key).is_none() {
                out.insert(key.clone(), v.clone());
            }
        }
        for (key, v) in source {
            if let Some(renamed) = lookup(key) {
                out.insert(renamed.to_owned(), v.clone());
            }
        }
        Value::Object(out)
    }
}

/// Translates one raw upstream record into its canonical form.
pub fn canonicalize<T: ResourceEntity>(
    raw: &Value,
    map: &FieldMap,
) -> Result<Canonical<T>, FrameworkError> {
    let internal = map.to_internal(raw);
    let value = serde_json::from_value::<T>(internal)
        .map_err(|e| FrameworkError::Decode(e.to_string()))?;
    Ok(Canonical::new(value, raw.clone()))
}
