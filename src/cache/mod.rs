// Cache module for local filesystem caching.
// Persists fetched listings so they can be shown before the network responds.

pub mod paths;
pub mod store;

pub use paths::{CacheKey, cache_dir, data_dir};
pub use store::{CacheStore, CachedData};
