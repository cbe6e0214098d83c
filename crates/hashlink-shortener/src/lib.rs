//! The shortening engine.
//!
//! [`ShorteningEngine`] implements [`hashlink_core::Shortener`] on top of any
//! [`Repository`](hashlink_core::Repository) and
//! [`UrlCache`](hashlink_core::UrlCache): codes come from the hash chain,
//! uniqueness is enforced by the repository, and the cache is consulted
//! cache-aside on reads.

pub mod config;
pub mod engine;

pub use config::EngineConfig;
pub use engine::ShorteningEngine;
