#![warn(missing_docs)]
//! Redis storage backend for relay.
//!
//! Records written here persist across process restarts and are shared by
//! every process pointed at the same server, making this the backend of
//! choice when several CLI invocations should see one cache. Consistency is
//! whatever the Redis deployment provides — relay layers no coherence
//! protocol on top.

pub mod backend;
pub mod error;

#[doc(inline)]
pub use crate::backend::{RedisBackend, RedisBackendBuilder};
pub use crate::error::Error;
