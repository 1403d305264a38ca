//! Storage backend contract for relay response caches.
//!
//! If you want to implement your own backend, you are in the right place:
//! implement [`Backend`] over any store with atomic per-key replace
//! semantics. The response cache never lets a backend failure abort a
//! request — every error here degrades to a cache miss.

mod backend;
mod memory;

pub use backend::{Backend, BackendResult};
pub use memory::MemoryBackend;

use thiserror::Error;

/// General groups of errors in backend interaction.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Internal backend error, state or computation error.
    ///
    /// Any error not bound to network interaction.
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),
    /// Network interaction error.
    #[error(transparent)]
    Connection(Box<dyn std::error::Error + Send + Sync>),
}

/// Status of a remove operation.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteStatus {
    /// Record successfully deleted.
    Deleted(u32),
    /// Record already missing.
    Missing,
}
