//! In-memory draft store

use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::drafts::types::{CreateDraftRequest, Draft, DraftStatus, UpdateDraftRequest};
use crate::error::{OutreachError, Result};

/// Holds open drafts keyed by id
pub struct DraftStore {
    drafts: RwLock<HashMap<String, Draft>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self {
            drafts: RwLock::new(HashMap::new()),
        }
    }

    /// Create an open draft and return its id
    pub async fn create(&self, request: CreateDraftRequest) -> String {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let draft = Draft {
            id: id.clone(),
            template: request.template,
            recipients: request.recipients,
            cc: request.cc,
            status: DraftStatus::Open,
            created_at: now,
            updated_at: now,
        };

        self.drafts.write().await.insert(id.clone(), draft);
        info!("Created draft {}", id);
        id
    }

    /// Get a snapshot of a draft
    pub async fn get(&self, id: &str) -> Option<Draft> {
        self.drafts.read().await.get(id).cloned()
    }

    /// Replace the supplied fields of a draft
    ///
    /// An update with no fields is a no-op that still requires the draft to
    /// exist.
    pub async fn update(&self, id: &str, request: UpdateDraftRequest) -> Result<Draft> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts
            .get_mut(id)
            .ok_or_else(|| OutreachError::NotFound(format!("Draft not found: {}", id)))?;

        if request.is_empty() {
            debug!("Empty update for draft {}", id);
            return Ok(draft.clone());
        }

        if let Some(template) = request.template {
            draft.template = template;
        }
        if let Some(recipients) = request.recipients {
            draft.recipients = recipients;
        }
        if let Some(cc) = request.cc {
            draft.cc = cc;
        }
        draft.updated_at = Utc::now();

        info!("Updated draft {}", id);
        Ok(draft.clone())
    }

    /// Remove a draft and return its final snapshot, marked as sent
    ///
    /// At most one call per id succeeds; every later call is `NotFound`.
    pub async fn take_and_remove(&self, id: &str) -> Result<Draft> {
        let mut draft = self
            .drafts
            .write()
            .await
            .remove(id)
            .ok_or_else(|| OutreachError::NotFound(format!("Draft not found: {}", id)))?;

        draft.status = DraftStatus::Sent;
        info!("Draft {} consumed", id);
        Ok(draft)
    }

    /// Number of open drafts
    pub async fn len(&self) -> usize {
        self.drafts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}
