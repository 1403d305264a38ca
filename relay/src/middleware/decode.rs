//! Response body decoding.

use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use relay_core::{Request, Response};

use super::{Middleware, Next};
use crate::error::Error;

/// Parses JSON response bodies into a structured value for downstream
/// consumers.
///
/// Only responses with a non-empty body and a JSON content type are
/// decoded. An undecodable body on a success status is a failure of its
/// own, never silently swallowed; error-path bodies stay raw — the status
/// middleware has already pulled what it needs from them.
#[derive(Debug, Default)]
pub struct DecodeMiddleware;

#[async_trait]
impl Middleware for DecodeMiddleware {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, Error> {
        let mut response = next.run(request).await?;

        if response.body().is_empty() || !has_json_content_type(&response) {
            return Ok(response);
        }
        match serde_json::from_slice(response.body()) {
            Ok(value) => response.set_json(value),
            Err(error) if response.status().is_success() => {
                return Err(Error::RequestFailed {
                    message: format!("could not decode response body: {error}"),
                });
            }
            Err(_) => {}
        }
        Ok(response)
    }
}

fn has_json_content_type(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("json"))
}
