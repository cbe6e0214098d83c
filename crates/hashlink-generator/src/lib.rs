//! Deterministic short code generation.
//!
//! A [`HashChain`] runs a URL through an ordered list of [`HashStage`]s and
//! renders each digest with the [`CodeEncoder`], yielding one candidate code
//! per stage. Which candidate ends up stored is decided by the shortening
//! engine against the store.

pub mod chain;
pub mod encoder;
pub mod hasher;

pub use chain::{Candidate, HashChain, DEFAULT_CODE_LENGTH};
pub use encoder::{CodeEncoder, ALPHABET};
pub use hasher::HashStage;
