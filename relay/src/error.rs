//! Typed failures surfaced by the request pipeline.

use thiserror::Error;

/// Failures surfaced by [`Client::execute`](crate::Client::execute).
///
/// A middleware-detected failure aborts the pipeline immediately and reaches
/// the caller as one of these variants; no retries happen inside the
/// pipeline. Storage failures never appear here — the cache absorbs them and
/// falls back to the origin.
#[derive(Debug, Error)]
pub enum Error {
    /// The origin rejected the supplied credential (401). Not retryable
    /// without operator intervention.
    #[error("authentication failed: set RELAY_TOKEN to a valid access token")]
    AuthenticationFailed,

    /// The rate limit for origin API calls is exhausted (403).
    #[error("rate limit exceeded for origin API calls")]
    RateLimitExceeded,

    /// A mutation targeted a resource the origin does not know (404 on PUT).
    #[error("resource `{url}` does not exist")]
    MissingResource {
        /// URL of the rejected request.
        url: String,
    },

    /// The requested subject does not exist at the origin (404).
    #[error("subject `{url}` does not exist")]
    MissingSubject {
        /// URL of the rejected request.
        url: String,
    },

    /// The origin rejected the submitted entity (422).
    #[error("the origin rejected the submitted entity")]
    ValidationFailed,

    /// Any status outside the accepted set, or an undecodable success body.
    #[error("request failed: {message}")]
    RequestFailed {
        /// Failure message, taken from the origin response body when present.
        message: String,
    },

    /// The transport could not complete the exchange.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The request URL could not be parsed.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] http::uri::InvalidUri),

    /// The pipeline could not be constructed.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Wraps a transport-level failure.
    pub fn transport(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Transport(Box::new(error))
    }
}
