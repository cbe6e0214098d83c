//! Core types and traits for the hashlink URL shortener.
//!
//! This crate holds the pieces every other crate agrees on: the validated
//! [`ShortCode`], the stored [`UrlRecord`], the error taxonomy, and the three
//! seams of the system: [`Repository`] (the durable store), [`UrlCache`]
//! (the best-effort cache) and [`Shortener`] (the engine boundary exposed to
//! transports).

pub mod cache;
pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;
pub mod url;

pub use cache::UrlCache;
pub use error::{CacheError, ShortenerError, StorageError};
pub use repository::{InsertOutcome, Repository, UrlMapping, UrlRecord};
pub use shortcode::ShortCode;
pub use shortener::{ShortenOutcome, Shortener};
