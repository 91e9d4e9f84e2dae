//! Draft types and data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A not-yet-sent message bound to its recipients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    /// Unique identifier, never reused
    pub id: String,
    /// Template text with `{field}` placeholders
    pub template: String,
    /// Recipient emails in send order (duplicates allowed)
    pub recipients: Vec<String>,
    /// Carbon-copy emails attached to every message
    pub cc: Vec<String>,
    pub status: DraftStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Draft lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    /// Stored and editable
    Open,
    /// Consumed by a send; only ever seen on the snapshot returned by the store
    Sent,
}

/// Request to create a new draft
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDraftRequest {
    pub template: String,
    pub recipients: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
}

/// Request to update an existing draft
///
/// Each supplied field replaces the stored value wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDraftRequest {
    pub template: Option<String>,
    pub recipients: Option<Vec<String>>,
    pub cc: Option<Vec<String>>,
}

impl UpdateDraftRequest {
    pub fn is_empty(&self) -> bool {
        self.template.is_none() && self.recipients.is_none() && self.cc.is_none()
    }
}
