//! # Operations
//!
//! Vocabulary shared by the registry, the modules and the clients:
//!
//! - [`OperationName`]: unique name of an asynchronous operation (`"developers/list"`).
//! - [`OperationDef`]: how the registry turns an invocation into a transport request.
//! - [`OperationKind`]: which standard mutation contract a module applies for it.
//! - [`OperationEvent`]: one phase of one invocation, fanned out to every subscriber.
//!
//! Every invocation follows the three-phase lifecycle `Started → (Succeeded | Failed)`,
//! exactly once, and carries the same [`RequestId`] and call arguments in all of its
//! events.

use serde_json::{Map, Value};
use std::fmt::{self, Display};
use std::sync::Arc;

use crate::error::RequestError;
use crate::transport::Method;

/// Unique name of an asynchronous operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationName(String);

impl OperationName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OperationName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for OperationName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monotonically increasing invocation id, unique within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req_{}", self.0)
    }
}

/// The standard mutation contracts a module can bind an operation to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    List,
    Get,
    Create,
    Update,
    Delete,
    StatusUpdate,
}

impl OperationKind {
    /// Suffix used by the conventional `"<resource>/<suffix>"` operation names.
    pub fn suffix(self) -> &'static str {
        match self {
            OperationKind::List => "list",
            OperationKind::Get => "get",
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
            OperationKind::StatusUpdate => "updateStatus",
        }
    }

    /// Kinds whose success replaces state wholesale; only the newest invocation may commit.
    pub fn is_replacing(self) -> bool {
        matches!(self, OperationKind::List | OperationKind::Get)
    }
}

/// Conventional name for a resource's operation of the given kind.
pub fn operation_name(resource: &str, kind: OperationKind) -> OperationName {
    OperationName(format!("{resource}/{}", kind.suffix()))
}

/// Definition of a named operation: method and path template.
///
/// Path templates use `{key}` placeholders filled from the call arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDef {
    pub name: OperationName,
    pub method: Method,
    pub path: String,
}

impl OperationDef {
    pub fn new(name: impl Into<OperationName>, method: Method, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
        }
    }

    /// The five standard operations for a REST collection mounted at `path`.
    pub fn crud(resource: &str, path: &str) -> Vec<Self> {
        let item = format!("{path}/{{id}}");
        vec![
            Self::new(operation_name(resource, OperationKind::List), Method::Get, path),
            Self::new(operation_name(resource, OperationKind::Get), Method::Get, item.clone()),
            Self::new(operation_name(resource, OperationKind::Create), Method::Post, path),
            Self::new(operation_name(resource, OperationKind::Update), Method::Put, item.clone()),
            Self::new(operation_name(resource, OperationKind::Delete), Method::Delete, item),
        ]
    }

    /// Status update operation (`PATCH <path>/{id}/status`).
    pub fn status(resource: &str, path: &str) -> Self {
        Self::new(
            operation_name(resource, OperationKind::StatusUpdate),
            Method::Patch,
            format!("{path}/{{id}}/status"),
        )
    }

    /// Placeholder keys in the path template, in order of appearance.
    pub fn path_keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        let mut rest = self.path.as_str();
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            keys.push(&rest[start + 1..start + len]);
            rest = &rest[start + len + 1..];
        }
        keys
    }

    /// Fills the path template from `args`.
    ///
    /// Returns the rendered path and the arguments not consumed by it.
    pub fn render(&self, args: &Value) -> Result<(String, Map<String, Value>), RequestError> {
        let mut remaining = match args {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            other => {
                return Err(RequestError::Unknown(format!(
                    "Arguments of {} must be an object, got {other}",
                    self.name
                )))
            }
        };

        let mut path = self.path.clone();
        for key in self.path_keys() {
            let value = remaining.remove(key).unwrap_or(Value::Null);
            let segment = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                _ => {
                    return Err(RequestError::Unknown(format!(
                        "Missing path argument `{key}` for {}",
                        self.name
                    )))
                }
            };
            path = path.replace(&format!("{{{key}}}"), &segment);
        }
        Ok((path, remaining))
    }
}

/// One phase of an invocation's lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Started,
    Succeeded(Arc<Value>),
    Failed(RequestError),
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Phase::Started)
    }
}

/// A lifecycle event, delivered to every subscriber and to the invocation's observer.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationEvent {
    pub operation: OperationName,
    pub request_id: RequestId,
    /// The original call arguments, shared by all events of one invocation.
    pub args: Arc<Value>,
    pub phase: Phase,
}

impl OperationEvent {
    pub fn started(operation: OperationName, request_id: RequestId, args: Arc<Value>) -> Self {
        Self {
            operation,
            request_id,
            args,
            phase: Phase::Started,
        }
    }

    /// The terminal event that follows `self` with the given phase.
    pub fn with_phase(&self, phase: Phase) -> Self {
        Self {
            operation: self.operation.clone(),
            request_id: self.request_id,
            args: Arc::clone(&self.args),
            phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_crud_table() {
        let defs = OperationDef::crud("developers", "/developers");
        let names: Vec<_> = defs.iter().map(|d| d.name.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "developers/list",
                "developers/get",
                "developers/create",
                "developers/update",
                "developers/delete"
            ]
        );
        assert_eq!(defs[3].method, Method::Put);
        assert_eq!(defs[3].path, "/developers/{id}");
    }

    #[test]
    fn test_render_consumes_path_keys() {
        let def = OperationDef::status("leads", "/leads");
        let (path, rest) = def.render(&json!({"id": 12, "status": "qualified"})).unwrap();
        assert_eq!(path, "/leads/12/status");
        assert_eq!(Value::Object(rest), json!({"status": "qualified"}));
    }

    #[test]
    fn test_render_requires_path_keys() {
        let def = OperationDef::new("properties/get", Method::Get, "/properties/{id}");
        assert!(matches!(def.render(&json!({})), Err(RequestError::Unknown(_))));
        assert!(def.render(&json!({"id": null})).is_err());
    }

    #[test]
    fn test_multiple_placeholders() {
        let def = OperationDef::new(
            "units/get",
            Method::Get,
            "/properties/{propertyId}/units/{id}",
        );
        assert_eq!(def.path_keys(), vec!["propertyId", "id"]);
        let (path, rest) = def
            .render(&json!({"propertyId": "7", "id": 3, "include": "owner"}))
            .unwrap();
        assert_eq!(path, "/properties/7/units/3");
        assert_eq!(rest.len(), 1);
    }
}
