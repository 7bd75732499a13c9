//! Resource identifiers.
//!
//! Upstream APIs are not consistent about id types: the same record may come back
//! as `{"id": 7}` from one endpoint and `{"id": "7"}` from another. [`ResourceId`]
//! normalizes numeric strings to integers so both compare equal.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt::{self, Display};

/// Identifier of a server resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceId {
    Int(i64),
    Text(String),
}

impl ResourceId {
    /// Reads an id out of a JSON scalar. Returns `None` for null, objects and arrays.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(ResourceId::Int),
            Value::String(s) => Some(Self::from(s.as_str())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            ResourceId::Int(n) => Value::from(*n),
            ResourceId::Text(s) => Value::from(s.clone()),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Int(id)
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        ResourceId::Int(i64::from(id))
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        ResourceId::Int(i64::from(id))
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        match id.trim().parse::<i64>() {
            Ok(n) => ResourceId::Int(n),
            Err(_) => ResourceId::Text(id.to_owned()),
        }
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::from(id.as_str())
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(n) => write!(f, "{n}"),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResourceId::Int(n) => serializer.serialize_i64(*n),
            ResourceId::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ResourceId::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid resource id: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_strings_normalize() {
        assert_eq!(ResourceId::from_value(&json!("7")), Some(ResourceId::Int(7)));
        assert_eq!(ResourceId::from_value(&json!(7)), Some(ResourceId::Int(7)));
        assert_eq!(
            ResourceId::from_value(&json!("a1b2")),
            Some(ResourceId::Text("a1b2".into()))
        );
        assert_eq!(ResourceId::from_value(&json!(null)), None);
    }

    #[test]
    fn test_deserialize_rejects_objects() {
        let id: ResourceId = serde_json::from_value(json!("42")).unwrap();
        assert_eq!(id, ResourceId::Int(42));
        assert!(serde_json::from_value::<ResourceId>(json!({"id": 1})).is_err());
    }
}
