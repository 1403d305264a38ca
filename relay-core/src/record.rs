//! Serializable cache records and HTTP freshness evaluation.
//!
//! A [`StoredResponse`] is the snapshot of a response a storage backend
//! persists. Freshness is never stored — it is derived on read from the
//! record's `Date` and `Cache-Control` headers, so the same record can be
//! fresh for one request and stale for the next.

use std::sync::LazyLock;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::header::{CACHE_CONTROL, DATE, ETAG};
use http::{HeaderMap, HeaderValue, StatusCode};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Response;

static MAX_AGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"max-age=(\d+)").expect("max-age pattern is valid"));

/// Snapshot of a response as persisted by a storage backend.
///
/// The serialized form must survive a serialize → deserialize round trip
/// unchanged; the revalidation policy depends on getting the original
/// headers (in particular `ETag`) back intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResponse {
    #[serde(with = "http_serde::status_code")]
    status: StatusCode,
    #[serde(with = "http_serde::header_map")]
    headers: HeaderMap,
    body: Bytes,
    received_at: DateTime<Utc>,
}

impl StoredResponse {
    /// Deep-copies a live response into a record.
    pub fn from_response(response: &Response) -> Self {
        StoredResponse {
            status: response.status(),
            headers: response.headers().clone(),
            body: response.body().clone(),
            received_at: response.received_at(),
        }
    }

    /// Materializes an independent response from the record.
    pub fn to_response(&self) -> Response {
        Response::new(
            self.status,
            self.headers.clone(),
            self.body.clone(),
            self.received_at,
        )
    }

    /// Encodes the record for storage.
    pub fn serialize(&self) -> serde_json::Result<Bytes> {
        serde_json::to_vec(self).map(Bytes::from)
    }

    /// Decodes a record previously produced by [`serialize`](Self::serialize).
    pub fn deserialize(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Recorded status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Recorded headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Recorded body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The record's `Date` header parsed as an HTTP date.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        let value = self.headers.get(DATE)?.to_str().ok()?;
        DateTime::parse_from_rfc2822(value)
            .ok()
            .map(|date| date.with_timezone(&Utc))
    }

    /// Seconds elapsed since the record's `Date` header.
    pub fn age(&self, now: DateTime<Utc>) -> Option<i64> {
        self.date().map(|date| (now - date).num_seconds())
    }

    /// The `max-age` directive of the record's `Cache-Control` header, in
    /// seconds.
    pub fn max_age(&self) -> Option<i64> {
        let value = self.headers.get(CACHE_CONTROL)?.to_str().ok()?;
        MAX_AGE.captures(value)?[1].parse().ok()
    }

    /// Whether the record is still inside its declared freshness window.
    ///
    /// A record missing either a parseable `Date` or a `max-age` directive
    /// is never fresh; no default window is inferred.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match (self.age(now), self.max_age()) {
            (Some(age), Some(max_age)) => age <= max_age,
            _ => false,
        }
    }

    /// Whether the origin mandated revalidation on every request.
    ///
    /// A `no-cache` or `must-validate` directive wins over `max-age`: the
    /// record must be revalidated even inside its freshness window.
    pub fn requires_revalidation(&self) -> bool {
        self.cache_control_directives()
            .any(|directive| directive == "no-cache" || directive == "must-validate")
    }

    /// Entity tag to offer in `If-None-Match` on revalidation.
    pub fn etag(&self) -> Option<&HeaderValue> {
        self.headers.get(ETAG)
    }

    /// Replaces the record's `Date` after a successful revalidation.
    ///
    /// Body, status and `ETag` keep their original values; this is the only
    /// in-place mutation a record ever sees.
    pub fn set_date(&mut self, date: HeaderValue) {
        self.headers.insert(DATE, date);
    }

    fn cache_control_directives(&self) -> impl Iterator<Item = &str> {
        self.headers
            .get(CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .into_iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn http_date(time: DateTime<Utc>) -> String {
        time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }

    fn record(headers: &[(&str, &str)], body: &str) -> StoredResponse {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                name.parse::<http::header::HeaderName>().unwrap(),
                value.parse::<HeaderValue>().unwrap(),
            );
        }
        let response = Response::new(
            StatusCode::OK,
            map,
            Bytes::from(body.as_bytes().to_vec()),
            Utc::now(),
        );
        StoredResponse::from_response(&response)
    }

    #[test]
    fn serialized_records_round_trip_unchanged() {
        let record = record(
            &[
                ("date", "Tue, 15 Nov 1994 08:12:31 GMT"),
                ("cache-control", "max-age=60"),
                ("etag", "\"v1\""),
                ("content-type", "application/json"),
            ],
            r#"{"x":1}"#,
        );

        let bytes = record.serialize().unwrap();
        let decoded = StoredResponse::deserialize(&bytes).unwrap();

        assert_eq!(decoded, record);
    }

    #[test]
    fn record_inside_its_window_is_fresh() {
        let now = Utc::now();
        let record = record(
            &[
                ("date", &http_date(now - Duration::seconds(10))),
                ("cache-control", "max-age=60"),
            ],
            "",
        );

        assert!(record.is_fresh(now));
    }

    #[test]
    fn record_past_its_window_is_stale() {
        let now = Utc::now();
        let record = record(
            &[
                ("date", &http_date(now - Duration::seconds(90))),
                ("cache-control", "max-age=60"),
            ],
            "",
        );

        assert!(!record.is_fresh(now));
    }

    #[test]
    fn record_without_a_date_is_never_fresh() {
        let record = record(&[("cache-control", "max-age=60")], "");

        assert!(!record.is_fresh(Utc::now()));
    }

    #[test]
    fn record_without_max_age_is_never_fresh() {
        let now = Utc::now();
        let record = record(&[("date", &http_date(now))], "");

        assert!(!record.is_fresh(now));
    }

    #[test]
    fn max_age_is_extracted_among_other_directives() {
        let record = record(&[("cache-control", "public, max-age=120, immutable")], "");

        assert_eq!(record.max_age(), Some(120));
    }

    #[test]
    fn revalidation_directives_win_over_max_age() {
        assert!(record(&[("cache-control", "no-cache")], "").requires_revalidation());
        assert!(record(&[("cache-control", "must-validate")], "").requires_revalidation());
        assert!(
            record(&[("cache-control", "max-age=60, no-cache")], "").requires_revalidation()
        );
        assert!(!record(&[("cache-control", "max-age=60")], "").requires_revalidation());
    }

    #[test]
    fn set_date_keeps_body_and_etag() {
        let mut record = record(
            &[
                ("date", "Tue, 15 Nov 1994 08:12:31 GMT"),
                ("etag", "\"v1\""),
            ],
            "payload",
        );

        record.set_date(HeaderValue::from_static("Wed, 16 Nov 1994 08:12:31 GMT"));

        assert_eq!(
            record.headers().get(DATE).unwrap(),
            "Wed, 16 Nov 1994 08:12:31 GMT"
        );
        assert_eq!(record.etag().unwrap(), "\"v1\"");
        assert_eq!(record.body().as_ref(), b"payload");
    }
}
