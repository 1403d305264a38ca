//! Redis backend implementation.

use async_trait::async_trait;
use bytes::Bytes;
use redis::{Client, aio::ConnectionManager};
use relay_backend::{Backend, BackendResult, DeleteStatus};
use relay_core::CacheKey;
use tokio::sync::OnceCell;
use tracing::trace;

use crate::error::Error;

/// Redis storage backend based on the redis-rs crate.
///
/// Uses a [`ConnectionManager`] for asynchronous network interaction,
/// connecting lazily on first use. Keys are the cache key's string form;
/// values are stored verbatim with `SET`, which gives the atomic per-key
/// replace the [`Backend`] contract asks for.
///
/// [`ConnectionManager`]: redis::aio::ConnectionManager
#[derive(Clone)]
pub struct RedisBackend {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    name: String,
}

impl RedisBackend {
    /// Creates a backend with default settings (`redis://127.0.0.1/`).
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Creates a new builder with default settings.
    #[must_use]
    pub fn builder() -> RedisBackendBuilder {
        RedisBackendBuilder::default()
    }

    /// Lazy connection to redis via [`ConnectionManager`].
    async fn connection(&self) -> Result<&ConnectionManager, Error> {
        trace!("get connection manager");
        self.connection
            .get_or_try_init(|| {
                trace!("initialize new redis connection manager");
                self.client.get_connection_manager()
            })
            .await
            .map_err(Error::from)
    }

    /// Removes every record from the current database.
    ///
    /// Intended for tooling and tests, not for the request path.
    pub async fn flush(&self) -> Result<(), Error> {
        let mut con = self.connection().await?.clone();
        let _: () = redis::cmd("FLUSHDB")
            .query_async(&mut con)
            .await
            .map_err(Error::from)?;
        Ok(())
    }
}

/// Part of builder pattern implementation for [`RedisBackend`].
pub struct RedisBackendBuilder {
    connection_info: String,
    name: String,
}

impl Default for RedisBackendBuilder {
    fn default() -> Self {
        Self {
            connection_info: "redis://127.0.0.1/".to_owned(),
            name: "redis".to_owned(),
        }
    }
}

impl RedisBackendBuilder {
    /// Set connection info (host, port, database, etc.) for the backend.
    pub fn server(mut self, connection_info: impl Into<String>) -> Self {
        self.connection_info = connection_info.into();
        self
    }

    /// Set the backend name used in telemetry.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Create a new instance of the Redis backend with the passed settings.
    pub fn build(self) -> Result<RedisBackend, Error> {
        Ok(RedisBackend {
            client: Client::open(self.connection_info)?,
            connection: OnceCell::new(),
            name: self.name,
        })
    }
}

#[async_trait]
impl Backend for RedisBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<Bytes>> {
        let mut con = self.connection().await?.clone();
        let data: Option<Vec<u8>> = redis::cmd("GET")
            .arg(key.as_str())
            .query_async(&mut con)
            .await
            .map_err(Error::from)?;
        Ok(data.map(Bytes::from))
    }

    async fn write(&self, key: &CacheKey, value: Bytes) -> BackendResult<()> {
        let mut con = self.connection().await?.clone();
        let _: () = redis::cmd("SET")
            .arg(key.as_str())
            .arg(value.as_ref())
            .query_async(&mut con)
            .await
            .map_err(Error::from)?;
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus> {
        let mut con = self.connection().await?.clone();
        let deleted: i32 = redis::cmd("DEL")
            .arg(key.as_str())
            .query_async(&mut con)
            .await
            .map_err(Error::from)?;

        if deleted > 0 {
            Ok(DeleteStatus::Deleted(deleted as u32))
        } else {
            Ok(DeleteStatus::Missing)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
