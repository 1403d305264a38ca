//! Request descriptor flowing outward through the middleware chain.

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};

/// An HTTP request dispatched through the pipeline.
///
/// Headers carry [`http::HeaderMap`] semantics: names are case-insensitive
/// and `insert` replaces any previous value. Middlewares may add headers
/// before forwarding; nothing mutates a request after it reaches the
/// transport.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a request with no headers and no body.
    pub fn new(method: Method, uri: Uri) -> Self {
        Request {
            method,
            uri,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a GET request for `uri`.
    pub fn get(uri: Uri) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Creates a POST request carrying `body`.
    pub fn post(uri: Uri, body: impl Into<Bytes>) -> Self {
        Self::new(Method::POST, uri).with_body(body)
    }

    /// Creates a PUT request carrying `body`.
    pub fn put(uri: Uri, body: impl Into<Bytes>) -> Self {
        Self::new(Method::PUT, uri).with_body(body)
    }

    /// Replaces the request body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Absolute request URL.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the request headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Request body, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}
