//! Request telemetry.

use std::time::Instant;

use async_trait::async_trait;
use relay_core::{CacheStatus, Request, Response};
use tracing::debug;

use super::{Middleware, Next};
use crate::error::Error;

/// Emits one structured event per completed request: URL, method, final
/// status, elapsed wall-clock time and the cache flag contributed by the
/// cache middleware.
///
/// Attached at the outermost layer so it observes the net effect of every
/// inner stage; never alters the exchange.
#[derive(Debug, Default)]
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, Error> {
        let method = request.method().clone();
        let url = request.uri().to_string();
        let started = Instant::now();

        let result = next.run(request).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(response) => debug!(
                %method,
                %url,
                status = response.status().as_u16(),
                elapsed_ms,
                cache = CacheStatus::from_headers(response.headers()).as_str(),
                "request completed"
            ),
            Err(error) => debug!(%method, %url, %error, elapsed_ms, "request failed"),
        }
        result
    }
}
