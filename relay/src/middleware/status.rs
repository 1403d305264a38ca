//! Response status classification.

use async_trait::async_trait;
use http::{Method, StatusCode};
use relay_core::{Request, Response};
use serde_json::Value;

use super::{Middleware, Next};
use crate::error::Error;

/// Status codes the client knows how to handle. Anything else becomes a
/// generic request failure carrying the origin-provided message.
const ACCEPTED: [StatusCode; 8] = [
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::NO_CONTENT,
    StatusCode::FOUND,
    StatusCode::UNAUTHORIZED,
    StatusCode::FORBIDDEN,
    StatusCode::NOT_FOUND,
    StatusCode::UNPROCESSABLE_ENTITY,
];

/// Classifies terminal status codes into domain failures once the response
/// is fully received.
///
/// A 404 is disambiguated by the original request: on the resource-mutation
/// path (PUT) the target resource is missing, otherwise the requested
/// subject is. The method and URL are captured before forwarding so both
/// sides of the exchange are in hand when the response arrives.
#[derive(Debug, Default)]
pub struct StatusMiddleware;

#[async_trait]
impl Middleware for StatusMiddleware {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, Error> {
        let method = request.method().clone();
        let url = request.uri().to_string();

        let response = next.run(request).await?;

        if !ACCEPTED.contains(&response.status()) {
            return Err(Error::RequestFailed {
                message: failure_message(&response),
            });
        }
        match response.status() {
            StatusCode::FORBIDDEN => Err(Error::RateLimitExceeded),
            StatusCode::NOT_FOUND if method == Method::PUT => Err(Error::MissingResource { url }),
            StatusCode::NOT_FOUND => Err(Error::MissingSubject { url }),
            StatusCode::UNPROCESSABLE_ENTITY => Err(Error::ValidationFailed),
            _ => Ok(response),
        }
    }
}

/// Pulls the failure message out of the response body's `message` field,
/// falling back to the canonical status reason.
fn failure_message(response: &Response) -> String {
    serde_json::from_slice::<Value>(response.body())
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| {
            response
                .status()
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        })
}
