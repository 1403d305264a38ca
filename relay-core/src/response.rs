//! Response descriptor flowing back through the middleware chain.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::{HeaderMap, StatusCode};
use serde_json::Value;

/// An HTTP response delivered by the pipeline.
///
/// Owned by the invocation that produced it. Responses served from cache are
/// independent deep copies of the stored record, never aliased with an
/// in-flight response.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    received_at: DateTime<Utc>,
    json: Option<Value>,
}

impl Response {
    /// Creates a response captured at `received_at`.
    ///
    /// The capture timestamp is stamped by the transport at receipt; the
    /// origin does not provide it.
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: impl Into<Bytes>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Response {
            status,
            headers,
            body: body.into(),
            received_at,
            json: None,
        }
    }

    /// Response status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the response headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Raw response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Wall-clock time the response was received.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Decoded JSON body, when the decode middleware recognized one.
    pub fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Attaches the decoded body for downstream consumers.
    pub fn set_json(&mut self, value: Value) {
        self.json = Some(value);
    }
}
