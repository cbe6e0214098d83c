//! [`UrlCache`] implementations: an in-process Moka cache and a Redis cache.
//!
//! Both honor the per-entry TTL handed to `set_url`. Neither is authoritative;
//! the shortening engine falls back to the store on any miss or error.

pub mod moka;
pub mod redis;

pub use hashlink_core::cache::{Result, UrlCache};
pub use hashlink_core::CacheError;
pub use self::moka::{CacheConfig, MokaUrlCache};
pub use self::redis::RedisUrlCache;
