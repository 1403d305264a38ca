//! Cache keys for request lookups.

use std::fmt;

use http::{Method, Uri};

use crate::Request;

/// Identifies a cacheable request in a storage backend.
///
/// Keys are derived from the request method and normalized URL. Only GET
/// requests participate in caching, so the key reduces to the normalized URL
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the storage key for `request`, or `None` when the request
    /// does not participate in caching.
    pub fn from_request(request: &Request) -> Option<Self> {
        (request.method() == Method::GET).then(|| Self::from_uri(request.uri()))
    }

    /// Normalizes a URL into key form: scheme and authority lowercased, path
    /// and query kept verbatim.
    pub fn from_uri(uri: &Uri) -> Self {
        let mut key = String::new();
        if let Some(scheme) = uri.scheme_str() {
            key.push_str(&scheme.to_ascii_lowercase());
            key.push_str("://");
        }
        if let Some(authority) = uri.authority() {
            key.push_str(&authority.as_str().to_ascii_lowercase());
        }
        match uri.path_and_query() {
            Some(path_and_query) => key.push_str(path_and_query.as_str()),
            None => key.push('/'),
        }
        CacheKey(key)
    }

    /// The key as a string slice, suitable for string-keyed stores.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
