//! Pipeline assembly and the execute entry point.

use std::env;
use std::sync::Arc;

use http::Uri;
use relay_backend::{Backend, MemoryBackend};
use relay_core::{Request, Response};

use crate::error::Error;
use crate::middleware::{
    AuthMiddleware, CacheMiddleware, DecodeMiddleware, LoggingMiddleware, Middleware, Next,
    StatusMiddleware,
};
use crate::transport::{ReqwestTransport, Transport};

/// Environment variable consulted for the bearer token when none is supplied
/// explicitly.
pub const TOKEN_ENV: &str = "RELAY_TOKEN";

/// The assembled middleware pipeline.
///
/// Stages wrap the transport in a fixed onion order, outermost to innermost:
/// logging → auth → decode → status → cache → transport. The order is
/// load-bearing: the cache sits innermost among the logic stages so a hit
/// flows back through every outer stage exactly as an origin response would,
/// and logging sits outermost so it observes the net effect of the whole
/// chain.
///
/// Callers own the client's lifetime; there is no process-wide instance.
pub struct Client {
    transport: Box<dyn Transport>,
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl Client {
    /// Starts building a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Runs `request` through the pipeline.
    pub async fn execute(&self, request: Request) -> Result<Response, Error> {
        Next::new(self.transport.as_ref(), &self.middlewares)
            .run(request)
            .await
    }

    /// Convenience wrapper: GET `url`.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        let uri: Uri = url.parse()?;
        self.execute(Request::get(uri)).await
    }
}

/// Builder for [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    token: Option<String>,
    backend: Option<Arc<dyn Backend>>,
    transport: Option<Box<dyn Transport>>,
}

impl ClientBuilder {
    /// Supplies the bearer token explicitly instead of reading [`TOKEN_ENV`].
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Selects the storage backend. Defaults to a process-local
    /// [`MemoryBackend`].
    pub fn backend(mut self, backend: impl Backend + 'static) -> Self {
        self.backend = Some(Arc::new(backend));
        self
    }

    /// Selects the transport. Defaults to [`ReqwestTransport`].
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Assembles the pipeline. The credential is resolved exactly once,
    /// here.
    pub fn build(self) -> Result<Client, Error> {
        let token = match self.token {
            Some(token) => token,
            None => env::var(TOKEN_ENV).map_err(|_| {
                Error::Configuration(format!("set {TOKEN_ENV} to a valid access token"))
            })?,
        };
        let backend = self
            .backend
            .unwrap_or_else(|| Arc::new(MemoryBackend::new()));
        let transport = self
            .transport
            .unwrap_or_else(|| Box::new(ReqwestTransport::new()));

        let middlewares: Vec<Arc<dyn Middleware>> = vec![
            Arc::new(LoggingMiddleware),
            Arc::new(AuthMiddleware::new(&token)?),
            Arc::new(DecodeMiddleware),
            Arc::new(StatusMiddleware),
            Arc::new(CacheMiddleware::new(backend)),
        ];

        Ok(Client {
            transport,
            middlewares,
        })
    }
}
