//! # Mock Transport & Testing Guide
//!
//! `MockTransport` implements [`Transport`] entirely in memory. Tests queue canned
//! replies per route, run real invocations through a real registry and store, and
//! then assert on state and on the requests that were sent.
//!
//! ## When to use what
//!
//! | Need | Tool |
//! |------|------|
//! | A reply available immediately | `mock.on(method, path).reply(json)` |
//! | A failure | `mock.on(method, path).fail(err)` |
//! | Control *when* a reply lands (out-of-order completion) | `mock.on(method, path).defer()` |
//! | Disambiguate two calls to the same route | `.with_query(json)` / `.with_body(json)` |
//! | Inspect what was sent | `mock.requests()` |
//! | Assert every reply was consumed | `mock.verify()` |
//!
//! ## Example
//!
//! ```rust
//! use resource_sync::mock::MockTransport;
//! use resource_sync::transport::Method;
//! use resource_sync::{OperationDef, OperationRegistry};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = Arc::new(MockTransport::new());
//!     mock.on(Method::Get, "/developers").reply(json!({"data": [{"id": 1}]}));
//!
//!     let registry = OperationRegistry::builder(mock.clone())
//!         .define_all(OperationDef::crud("developers", "/developers"))
//!         .unwrap()
//!         .build();
//!
//!     let payload = registry
//!         .invoke(&"developers/list".into(), json!({}))
//!         .unwrap()
//!         .outcome()
//!         .await
//!         .unwrap();
//!     assert_eq!(payload["data"][0]["id"], 1);
//!     mock.verify();
//! }
//! ```
//!
//! Unmatched requests fail with [`RequestError::NotFound`] rather than panicking,
//! so a missing expectation shows up as module `error` state and in `verify()`.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

use crate::error::RequestError;
use crate::transport::{Method, Payload, RequestOptions, Transport};

type Reply = Result<Value, RequestError>;

enum MockReply {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

struct Expectation {
    method: Method,
    path: String,
    payload: Option<Payload>,
    reply: MockReply,
}

impl Expectation {
    fn matches(&self, method: Method, path: &str, payload: &Payload) -> bool {
        self.method == method
            && self.path == path
            && self.payload.as_ref().map_or(true, |expected| expected == payload)
    }
}

/// A request observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub payload: Payload,
    pub options: RequestOptions,
}

/// In-memory [`Transport`] with queued replies.
#[derive(Default)]
pub struct MockTransport {
    expectations: Mutex<Vec<Expectation>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an expectation for `method path`. Replies are consumed once, first match wins.
    pub fn on(&self, method: Method, path: &str) -> RouteBuilder<'_> {
        RouteBuilder {
            mock: self,
            method,
            path: path.to_owned(),
            payload: None,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Number of queued replies that no request consumed yet.
    pub fn pending(&self) -> usize {
        lock(&self.expectations).len()
    }

    /// Panics if any queued reply was never consumed.
    pub fn verify(&self) {
        let remaining = self.pending();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn push(&self, expectation: Expectation) {
        lock(&self.expectations).push(expectation);
    }

    fn take(&self, method: Method, path: &str, payload: &Payload) -> Option<MockReply> {
        let mut expectations = lock(&self.expectations);
        let index = expectations
            .iter()
            .position(|e| e.matches(method, path, payload))?;
        Some(expectations.remove(index).reply)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Builder for one queued reply.
pub struct RouteBuilder<'a> {
    mock: &'a MockTransport,
    method: Method,
    path: String,
    payload: Option<Payload>,
}

impl RouteBuilder<'_> {
    /// Only match requests whose query params equal `query` (an object).
    pub fn with_query(mut self, query: Value) -> Self {
        self.payload = Some(match query {
            Value::Object(map) if map.is_empty() => Payload::Empty,
            Value::Object(map) => Payload::Query(map),
            _ => Payload::Query(Map::new()),
        });
        self
    }

    /// Only match requests whose JSON body equals `body`.
    pub fn with_body(mut self, body: Value) -> Self {
        self.payload = Some(Payload::Json(body));
        self
    }

    pub fn reply(self, body: Value) {
        self.finish(MockReply::Ready(Ok(body)));
    }

    pub fn fail(self, error: RequestError) {
        self.finish(MockReply::Ready(Err(error)));
    }

    /// Queues a reply that stays pending until the returned handle resolves it.
    pub fn defer(self) -> DeferredReply {
        let (sender, receiver) = oneshot::channel();
        self.finish(MockReply::Deferred(receiver));
        DeferredReply { sender }
    }

    fn finish(self, reply: MockReply) {
        self.mock.push(Expectation {
            method: self.method,
            path: self.path,
            payload: self.payload,
            reply,
        });
    }
}

/// Resolves a deferred reply.
pub struct DeferredReply {
    sender: oneshot::Sender<Reply>,
}

impl DeferredReply {
    pub fn succeed(self, body: Value) {
        let _ = self.sender.send(Ok(body));
    }

    pub fn fail(self, error: RequestError) {
        let _ = self.sender.send(Err(error));
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        options: &RequestOptions,
    ) -> Result<Value, RequestError> {
        let reply = self.take(method, path, &payload);
        lock(&self.requests).push(RecordedRequest {
            method,
            path: path.to_owned(),
            payload,
            options: options.clone(),
        });

        match reply {
            Some(MockReply::Ready(reply)) => reply,
            Some(MockReply::Deferred(receiver)) => receiver.await.unwrap_or_else(|_| {
                Err(RequestError::Network("deferred reply dropped".into()))
            }),
            None => Err(RequestError::NotFound(format!(
                "No mock reply for {method} {path}"
            ))),
        }
    }
}
