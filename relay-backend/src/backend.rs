use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use relay_core::CacheKey;

use crate::{BackendError, DeleteStatus};

/// Result alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Pluggable persistence for serialized response records.
///
/// No ordering is required between concurrent writers to different keys, but
/// writers to the same key must replace the stored bytes atomically — a
/// reader must never observe a partial write.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the bytes stored under `key`, if any.
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<Bytes>>;

    /// Stores `value` under `key`, replacing any previous record.
    async fn write(&self, key: &CacheKey, value: Bytes) -> BackendResult<()>;

    /// Removes the record stored under `key`.
    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus>;

    /// Name of this backend, used in telemetry.
    fn name(&self) -> &str {
        "backend"
    }
}

#[async_trait]
impl Backend for Box<dyn Backend> {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<Bytes>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: Bytes) -> BackendResult<()> {
        (**self).write(key, value).await
    }

    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus> {
        (**self).remove(key).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl Backend for Arc<dyn Backend> {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<Bytes>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: Bytes) -> BackendResult<()> {
        (**self).write(key, value).await
    }

    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus> {
        (**self).remove(key).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
