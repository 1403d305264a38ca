//! Error types for Redis backend operations.
//!
//! All errors convert into [`BackendError`] for uniform handling across
//! backends; the response cache in turn treats any backend error as a cache
//! miss.
//!
//! [`BackendError`]: relay_backend::BackendError

use redis::RedisError;
use relay_backend::BackendError;

/// Error type for Redis backend operations.
///
/// Wraps errors from the underlying [`redis`] crate: connection failures,
/// protocol errors, authentication failures and command execution errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error from the underlying Redis client.
    #[error("redis backend error: {0}")]
    Redis(#[from] RedisError),
}

impl From<Error> for BackendError {
    fn from(error: Error) -> Self {
        Self::Connection(Box::new(error))
    }
}
