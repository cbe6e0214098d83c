//! Store implementations for hashlink.
//!
//! Both backends honour the [`Repository`] contract: short codes are unique
//! and insert-if-absent is atomic under concurrent callers.

pub mod memory;
pub mod mysql;

pub use hashlink_core::repository::{InsertOutcome, Repository, UrlRecord};
pub use hashlink_core::StorageError;
pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
