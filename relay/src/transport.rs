//! The raw transport seam at the bottom of the chain.

use async_trait::async_trait;
use chrono::Utc;
use relay_core::{Request, Response};

use crate::error::Error;

/// Dispatches a request over the wire.
///
/// This is the sole suspension point of the pipeline; timeout or
/// cancellation policy, if any, belongs to the implementation behind this
/// seam.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the exchange and stamps the capture timestamp on the
    /// response.
    async fn send(&self, request: Request) -> Result<Response, Error>;
}

/// Default transport backed by [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing, pre-configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        ReqwestTransport { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, Error> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.uri().to_string())
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(Error::transport)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::transport)?;

        Ok(Response::new(status, headers, body, Utc::now()))
    }
}
