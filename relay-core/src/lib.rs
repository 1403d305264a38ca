#![warn(missing_docs)]
//! # relay-core
//!
//! Value types shared by the relay pipeline and its storage backends:
//!
//! - [`Request`] / [`Response`] — the descriptors flowing through the
//!   middleware chain.
//! - [`StoredResponse`] — the serializable cache record, with the freshness
//!   and revalidation accessors the cache middleware evaluates on read.
//! - [`CacheKey`] — normalized-URL storage key for cacheable requests.
//! - [`CacheStatus`] — the hit/miss/revalidated flag carried on responses.

pub mod key;
pub mod record;
pub mod request;
pub mod response;
pub mod status;

pub use key::CacheKey;
pub use record::StoredResponse;
pub use request::Request;
pub use response::Response;
pub use status::{CACHE_STATUS_HEADER, CacheStatus};
