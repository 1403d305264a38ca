//! The middleware chain: onion-composed stages around the transport.
//!
//! Each [`Middleware`] receives the outgoing request plus a [`Next`] handle
//! to the remainder of the chain. Work done before `next.run(...)` mutates
//! the outgoing request; work done after the `.await` is the completion
//! hook and observes the eventual response. Completion hooks therefore run
//! innermost-first for any single request — the cache middleware's
//! bookkeeping happens before the logging middleware reads the cache flag.

pub mod auth;
pub mod cache;
pub mod decode;
pub mod logging;
pub mod status;

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use relay_core::{Request, Response};

use crate::error::Error;
use crate::transport::Transport;

pub use auth::AuthMiddleware;
pub use cache::CacheMiddleware;
pub use decode::DecodeMiddleware;
pub use logging::LoggingMiddleware;
pub use status::StatusMiddleware;

/// A pipeline stage observing and/or mutating the request/response exchange.
#[async_trait]
pub trait Middleware: Send + Sync + 'static {
    /// Processes `request`, forwarding through `next` toward the transport.
    ///
    /// Returning early without calling `next.run` short-circuits every inner
    /// stage — this is how the cache serves a hit without touching the
    /// origin.
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, Error>;
}

/// The remainder of the chain: the stages not yet applied, then the
/// transport.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    transport: &'a dyn Transport,
    middlewares: &'a [Arc<dyn Middleware>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(transport: &'a dyn Transport, middlewares: &'a [Arc<dyn Middleware>]) -> Self {
        Next {
            transport,
            middlewares,
        }
    }

    /// Forwards `request` one stage inward.
    pub fn run(self, request: Request) -> BoxFuture<'a, Result<Response, Error>> {
        match self.middlewares.split_first() {
            Some((current, rest)) => current.handle(request, Next::new(self.transport, rest)),
            None => self.transport.send(request),
        }
    }
}
