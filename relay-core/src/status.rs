//! Cache status flag carried on responses.

use http::header::HeaderName;
use http::{HeaderMap, HeaderValue};

/// Response header the cache middleware uses to hand the hit/miss flag to
/// outer observers.
pub const CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache-status");

/// Whether a request was satisfied from storage without contacting the
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheStatus {
    /// A fresh record was served without forwarding.
    Hit,
    /// The origin produced the response.
    #[default]
    Miss,
    /// A stale record was confirmed by the origin (304) and served from
    /// storage.
    Revalidated,
}

impl CacheStatus {
    /// The flag as a string slice.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
            CacheStatus::Revalidated => "REVALIDATED",
        }
    }

    /// The flag as a header value.
    pub fn as_header_value(&self) -> HeaderValue {
        HeaderValue::from_static(self.as_str())
    }

    /// Reads the flag back off a response, defaulting to a miss.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers
            .get(CACHE_STATUS_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            Some("HIT") => CacheStatus::Hit,
            Some("REVALIDATED") => CacheStatus::Revalidated,
            _ => CacheStatus::Miss,
        }
    }
}
