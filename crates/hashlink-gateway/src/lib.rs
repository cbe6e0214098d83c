//! HTTP gateway for the hashlink shortener.
//!
//! Exposes a [`Shortener`](hashlink_core::Shortener) as a small JSON API and
//! wires storage and cache backends from command line flags.

pub mod app;
pub mod backend;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::AppState;
