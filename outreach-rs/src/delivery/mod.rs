//! Outgoing message transport
//!
//! The dispatcher hands every recorded message to a [`MailTransport`]. No
//! real network send happens here.

use async_trait::async_trait;
use std::sync::Arc;

use crate::audit::SentRecord;
use crate::config::DeliveryConfig;
use crate::error::Result;

pub mod log;

pub use log::LogTransport;

/// Mail transport trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver one rendered message
    async fn deliver(&self, message: &SentRecord) -> Result<()>;

    /// Transport name, for logs
    fn name(&self) -> &'static str;
}

/// Transport that drops every message
#[derive(Debug, Clone, Default)]
pub struct NoopTransport;

#[async_trait]
impl MailTransport for NoopTransport {
    async fn deliver(&self, _message: &SentRecord) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

/// Build the transport selected by configuration
pub fn from_config(config: &DeliveryConfig) -> Arc<dyn MailTransport> {
    if config.enabled {
        Arc::new(LogTransport::new(config.from_address.clone()))
    } else {
        Arc::new(NoopTransport)
    }
}
