//! # Errors
//!
//! Two layers of errors live here:
//!
//! - [`RequestError`] is the outcome of a failed network operation. It is what a
//!   [`Transport`](crate::transport::Transport) rejects with, what travels inside a
//!   `Failed` event, and what a resource module turns into its `error` /
//!   `validation_errors` fields.
//! - [`FrameworkError`] covers the plumbing: a closed store mailbox, an operation
//!   name nobody defined, a module registered twice.
//!
//! | Variant | Typical source | Module effect |
//! |---------|----------------|---------------|
//! | `Network` | no response at all | `error` |
//! | `Validation` | 400 / 422 with per-field messages | `error` + `validation_errors` |
//! | `NotFound` | 404 | `error` |
//! | `Unknown` | anything else | `error` |

use serde_json::Value;
use std::collections::BTreeMap;

use crate::operation::OperationKind;

/// Failure of a single network operation.
///
/// The `Display` output is the display-ready message stored in a module's
/// `error` field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// The transport never got a response (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),
    /// The server rejected the input; `fields` maps field name to message.
    #[error("{message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, String>,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unknown(String),
}

impl RequestError {
    /// Classifies an HTTP status and JSON body into the error taxonomy.
    ///
    /// Validation bodies follow the usual `{ message, errors: { field: [msg, ..] } }`
    /// envelope; only the first message of each field is kept.
    pub fn from_response(status: u16, body: &Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned);

        match status {
            404 => RequestError::NotFound(message.unwrap_or_else(|| "Resource not found".into())),
            400 | 422 => match body.get("errors").and_then(Value::as_object) {
                Some(errors) => {
                    let fields = errors
                        .iter()
                        .filter_map(|(field, value)| {
                            first_message(value).map(|msg| (field.clone(), msg))
                        })
                        .collect();
                    RequestError::Validation {
                        message: message.unwrap_or_else(|| "The given data was invalid.".into()),
                        fields,
                    }
                }
                None => RequestError::Unknown(
                    message.unwrap_or_else(|| format!("Request failed with status {status}")),
                ),
            },
            _ => RequestError::Unknown(
                message.unwrap_or_else(|| format!("Request failed with status {status}")),
            ),
        }
    }

    /// Per-field messages, present only for [`RequestError::Validation`].
    pub fn validation_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            RequestError::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_message),
        _ => None,
    }
}

/// Errors raised by the framework plumbing itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    #[error("Operation defined twice: {0}")]
    DuplicateOperation(String),
    #[error("Unknown module: {0}")]
    UnknownModule(String),
    #[error("Module registered twice: {0}")]
    DuplicateModule(String),
    #[error("Module {module} has no {kind:?} operation")]
    UnboundOperation { module: String, kind: OperationKind },
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Encode error: {0}")]
    Encode(String),
    #[error(transparent)]
    Request(#[from] RequestError),
}
