//! Credential injection and authentication failure detection.

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::{HeaderValue, StatusCode};
use relay_core::{Request, Response};

use super::{Middleware, Next};
use crate::error::Error;

/// Injects a bearer token into every outgoing request and converts an
/// observed 401 into [`Error::AuthenticationFailed`].
///
/// The 401 check overrides any inner stage's classification: a rejected
/// credential is categorically not retryable without operator intervention.
pub struct AuthMiddleware {
    credential: HeaderValue,
}

impl AuthMiddleware {
    /// Builds the middleware from a bearer token.
    pub fn new(token: &str) -> Result<Self, Error> {
        let mut credential = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            Error::Configuration("token contains characters not valid in a header".to_owned())
        })?;
        credential.set_sensitive(true);
        Ok(AuthMiddleware { credential })
    }
}

#[async_trait]
impl Middleware for AuthMiddleware {
    async fn handle(&self, mut request: Request, next: Next<'_>) -> Result<Response, Error> {
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.credential.clone());

        let response = next.run(request).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::AuthenticationFailed);
        }
        Ok(response)
    }
}
