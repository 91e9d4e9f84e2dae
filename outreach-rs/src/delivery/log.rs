//! Log-only transport

use async_trait::async_trait;
use tracing::info;

use super::MailTransport;
use crate::audit::SentRecord;
use crate::error::Result;

/// Writes one log event per message instead of sending it
pub struct LogTransport {
    from_address: String,
}

impl LogTransport {
    pub fn new(from_address: String) -> Self {
        Self { from_address }
    }
}

#[async_trait]
impl MailTransport for LogTransport {
    async fn deliver(&self, message: &SentRecord) -> Result<()> {
        info!(
            from = %self.from_address,
            to = %message.to,
            cc = ?message.cc,
            body_len = message.body.len(),
            "Mock sending message"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
