//! outreach-rs: Nonprofit directory and templated outreach mailer
//!
//! Keeps a directory of recipient organizations, sends templated messages
//! to them immediately or through saved drafts, and records every sent
//! message in an append-only log.
//!
//! # Features
//!
//! - **Registry**: organizations keyed by email, first write wins
//! - **Templates**: flat `{field}` substitution with explicit missing-field errors
//! - **Drafts**: create, edit, then send exactly once
//! - **Audit log**: ordered record of what was sent, filterable by recipient
//!
//! # Example
//!
//! ```no_run
//! use outreach_rs::api::ApiServer;
//! use outreach_rs::config::Config;
//! use outreach_rs::delivery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let transport = delivery::from_config(&config.delivery);
//!
//!     let server = ApiServer::new(transport, config.server.listen_addr.clone());
//!     server.run(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`registry`]: Organization directory
//! - [`templates`]: Template rendering
//! - [`drafts`]: Draft storage
//! - [`audit`]: Sent message log
//! - [`dispatch`]: Recipient resolution and sending
//! - [`delivery`]: Transport behind the sends
//! - [`api`]: HTTP endpoints

pub mod api;
pub mod audit;
pub mod config;
pub mod delivery;
pub mod dispatch;
pub mod drafts;
pub mod error;
pub mod logging;
pub mod registry;
pub mod templates;

// Re-export commonly used types
pub use config::Config;
pub use error::{OutreachError, Result};
