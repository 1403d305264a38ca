//! Semantic response caching with HTTP freshness and revalidation.

use async_trait::async_trait;
use chrono::Utc;
use http::StatusCode;
use http::header::{CACHE_CONTROL, DATE, IF_NONE_MATCH};
use relay_backend::Backend;
use relay_core::{CACHE_STATUS_HEADER, CacheKey, CacheStatus, Request, Response, StoredResponse};
use tracing::warn;

use super::{Middleware, Next};
use crate::error::Error;

/// The innermost logic stage: serves fresh records without forwarding,
/// revalidates stale ones with `If-None-Match`, and persists cacheable
/// origin responses.
///
/// Sits directly above the transport so a cache hit flows back through every
/// outer stage exactly as an origin response would. Storage failures never
/// fail the request: each one is logged and degraded to a miss, trading an
/// extra origin round trip for availability.
pub struct CacheMiddleware<B> {
    backend: B,
}

impl<B: Backend> CacheMiddleware<B> {
    /// Wraps `backend` as the record store.
    pub fn new(backend: B) -> Self {
        CacheMiddleware { backend }
    }

    async fn read_record(&self, key: &CacheKey) -> Option<StoredResponse> {
        let bytes = match self.backend.read(key).await {
            Ok(bytes) => bytes?,
            Err(error) => {
                warn!(
                    backend = self.backend.name(),
                    %key,
                    %error,
                    "cache read failed, treating as miss"
                );
                return None;
            }
        };
        match StoredResponse::deserialize(&bytes) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(
                    backend = self.backend.name(),
                    %key,
                    %error,
                    "discarding undecodable cache record"
                );
                None
            }
        }
    }

    async fn write_record(&self, key: &CacheKey, record: &StoredResponse) {
        let bytes = match record.serialize() {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(%key, %error, "could not serialize cache record");
                return;
            }
        };
        if let Err(error) = self.backend.write(key, bytes).await {
            warn!(backend = self.backend.name(), %key, %error, "cache write failed");
        }
    }

    async fn remove_record(&self, key: &CacheKey) {
        if let Err(error) = self.backend.remove(key).await {
            warn!(backend = self.backend.name(), %key, %error, "cache remove failed");
        }
    }
}

#[async_trait]
impl<B: Backend + 'static> Middleware for CacheMiddleware<B> {
    async fn handle(&self, mut request: Request, next: Next<'_>) -> Result<Response, Error> {
        // Only GET requests participate in caching.
        let Some(key) = CacheKey::from_request(&request) else {
            let mut response = next.run(request).await?;
            flag(&mut response, CacheStatus::Miss);
            return Ok(response);
        };

        let record = self.read_record(&key).await;
        let had_record = record.is_some();

        if let Some(record) = &record {
            if record.is_fresh(Utc::now()) && !record.requires_revalidation() {
                let mut response = record.to_response();
                flag(&mut response, CacheStatus::Hit);
                return Ok(response);
            }
            // Stale, or revalidation mandated: offer the stored entity tag
            // so the origin can answer 304 instead of resending the body.
            // Without an ETag the forward is unconditional.
            if let Some(etag) = record.etag() {
                request.headers_mut().insert(IF_NONE_MATCH, etag.clone());
            }
        }

        let mut response = next.run(request).await?;

        if response.status() == StatusCode::NOT_MODIFIED {
            if let Some(mut record) = record {
                // The origin confirmed the stored representation. Refresh the
                // record's Date and serve body and status from the cache.
                if let Some(date) = response.headers().get(DATE) {
                    record.set_date(date.clone());
                }
                self.write_record(&key, &record).await;
                let mut revalidated = record.to_response();
                flag(&mut revalidated, CacheStatus::Revalidated);
                return Ok(revalidated);
            }
        }

        if is_cacheable(&response) {
            self.write_record(&key, &StoredResponse::from_response(&response))
                .await;
        } else if forbids_storage(&response) && had_record {
            // A no-store response overrides whatever was stored before; the
            // next request for this key must go back to the origin.
            self.remove_record(&key).await;
        }
        flag(&mut response, CacheStatus::Miss);
        Ok(response)
    }
}

fn flag(response: &mut Response, status: CacheStatus) {
    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, status.as_header_value());
}

/// A response may be persisted when it carries a `Cache-Control` header that
/// does not include `no-store`.
fn is_cacheable(response: &Response) -> bool {
    match cache_control(response) {
        Some(value) => !value.contains("no-store"),
        None => false,
    }
}

fn forbids_storage(response: &Response) -> bool {
    cache_control(response).is_some_and(|value| value.contains("no-store"))
}

fn cache_control(response: &Response) -> Option<&str> {
    response.headers().get(CACHE_CONTROL)?.to_str().ok()
}
