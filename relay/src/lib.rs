#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Typed failures surfaced by the pipeline.
pub mod error;

/// The middleware chain and the five built-in stages.
pub mod middleware;

/// The raw transport seam and the reqwest-backed default.
pub mod transport;

mod client;

pub use client::{Client, ClientBuilder, TOKEN_ENV};
pub use error::Error;
pub use middleware::{
    AuthMiddleware, CacheMiddleware, DecodeMiddleware, LoggingMiddleware, Middleware, Next,
    StatusMiddleware,
};
pub use transport::{ReqwestTransport, Transport};

pub use relay_backend::{Backend, BackendError, BackendResult, DeleteStatus, MemoryBackend};
pub use relay_core::{
    CACHE_STATUS_HEADER, CacheKey, CacheStatus, Request, Response, StoredResponse,
};
