//! Dispatcher: resolves, renders, records, delivers

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::audit::{AuditLog, SentRecord};
use crate::delivery::MailTransport;
use crate::dispatch::types::{DispatchReport, SendRequest};
use crate::drafts::DraftStore;
use crate::error::Result;
use crate::registry::OrganizationRegistry;
use crate::templates::TemplateRenderer;

/// Orchestrates sends against the registry, draft store and audit log
///
/// Each store is locked only for its own operation; the dispatcher never
/// holds two store locks at once.
pub struct Dispatcher {
    registry: Arc<OrganizationRegistry>,
    drafts: Arc<DraftStore>,
    audit: Arc<AuditLog>,
    transport: Arc<dyn MailTransport>,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<OrganizationRegistry>,
        drafts: Arc<DraftStore>,
        audit: Arc<AuditLog>,
        transport: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            registry,
            drafts,
            audit,
            transport,
        }
    }

    /// Send a template to every registered recipient right away
    pub async fn send_now(&self, request: SendRequest) -> Result<DispatchReport> {
        self.dispatch(&request.template, &request.recipients, &request.cc)
            .await
    }

    /// Consume a draft and send it
    ///
    /// The draft is removed before resolution starts and is not restored if
    /// rendering fails afterwards.
    pub async fn send_draft(&self, id: &str) -> Result<DispatchReport> {
        let draft = self.drafts.take_and_remove(id).await?;

        self.dispatch(&draft.template, &draft.recipients, &draft.cc)
            .await
            .inspect_err(|e| warn!("Draft {} was consumed but its dispatch failed: {}", id, e))
    }

    async fn dispatch(
        &self,
        template: &str,
        recipients: &[String],
        cc: &[String],
    ) -> Result<DispatchReport> {
        let mut report = DispatchReport::default();
        let mut batch = Vec::new();

        for recipient in recipients {
            let Some(organization) = self.registry.lookup(recipient).await else {
                debug!("Recipient {} not registered, skipping", recipient);
                report.skipped.push(recipient.clone());
                continue;
            };

            let body = TemplateRenderer::render(template, &organization.template_fields())?;
            batch.push(SentRecord::new(recipient.clone(), cc.to_vec(), body));
            report.sent.push(recipient.clone());
        }

        let (positions, stored) = self.audit.append_all(batch).await;

        for message in &stored {
            if let Err(e) = self.transport.deliver(message).await {
                warn!(
                    "Transport {} failed to deliver to {}: {}",
                    self.transport.name(),
                    message.to,
                    e
                );
            }
        }

        info!(
            sent = report.sent.len(),
            skipped = report.skipped.len(),
            audit_positions = ?positions,
            "Dispatch complete"
        );

        Ok(report)
    }
}
