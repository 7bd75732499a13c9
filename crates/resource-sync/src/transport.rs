//! # Transport
//!
//! The network client is an external collaborator. The framework only needs one
//! uniform call:
//!
//! ```text
//! request(method, path, payload, options) -> Result<RawPayload, RequestError>
//! ```
//!
//! Headers, authentication, retries and timeouts all belong to the implementation.
//! Implementations should classify HTTP failures with
//! [`RequestError::from_response`](crate::error::RequestError::from_response).

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt::{self, Display};

use crate::error::RequestError;
use crate::operation::{OperationName, RequestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Whether the remaining arguments travel as a JSON body (rather than query params).
    pub fn has_body(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

/// What travels alongside the path.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Query(Map<String, Value>),
    Json(Value),
}

impl Payload {
    /// Builds the payload from the arguments left over after rendering the path.
    ///
    /// Bodies prefer an explicit `data` argument; otherwise the leftovers are sent.
    pub fn from_args(method: Method, mut remaining: Map<String, Value>) -> Self {
        if method.has_body() {
            match remaining.remove("data") {
                Some(data) => Payload::Json(data),
                None if remaining.is_empty() => Payload::Empty,
                None => Payload::Json(Value::Object(remaining)),
            }
        } else if remaining.is_empty() {
            Payload::Empty
        } else {
            Payload::Query(remaining)
        }
    }
}

/// Correlation context passed with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub operation: OperationName,
    pub request_id: RequestId,
}

/// Uniform request function consumed by the operation registry.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        options: &RequestOptions,
    ) -> Result<Value, RequestError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_get_sends_query() {
        let payload = Payload::from_args(Method::Get, object(json!({"page": 2})));
        assert_eq!(payload, Payload::Query(object(json!({"page": 2}))));
        assert_eq!(Payload::from_args(Method::Delete, Map::new()), Payload::Empty);
    }

    #[test]
    fn test_body_prefers_data() {
        let payload = Payload::from_args(
            Method::Post,
            object(json!({"data": {"developer_name": "Emaar"}, "ignored": true})),
        );
        assert_eq!(payload, Payload::Json(json!({"developer_name": "Emaar"})));

        let payload = Payload::from_args(Method::Patch, object(json!({"status": "won"})));
        assert_eq!(payload, Payload::Json(json!({"status": "won"})));
    }
}
