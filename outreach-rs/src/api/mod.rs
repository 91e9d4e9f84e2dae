//! REST API module for outreach-rs
//!
//! Thin HTTP adapter over the registry, draft store, audit log and
//! dispatcher.

pub mod handlers;
pub mod server;

pub use handlers::{ApiError, AppState};
pub use server::ApiServer;
