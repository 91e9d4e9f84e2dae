//! Append-only log of dispatched messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// One message that was rendered and handed to delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentRecord {
    pub to: String,
    pub cc: Vec<String>,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl SentRecord {
    /// `sent_at` is provisional until the record is appended to an [`AuditLog`]
    pub fn new(to: impl Into<String>, cc: Vec<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            cc,
            body: body.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Ordered record of every sent message, oldest first
pub struct AuditLog {
    records: RwLock<Vec<SentRecord>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Append one record and return its zero-based position
    ///
    /// `sent_at` is stamped under the write lock, so timestamps never
    /// decrease along the log.
    pub async fn append(&self, mut record: SentRecord) -> usize {
        let mut records = self.records.write().await;
        record.sent_at = Utc::now();
        records.push(record);
        records.len() - 1
    }

    /// Append a batch contiguously
    ///
    /// Returns the positions assigned and the stamped records as stored.
    pub async fn append_all(
        &self,
        batch: Vec<SentRecord>,
    ) -> (std::ops::Range<usize>, Vec<SentRecord>) {
        let mut records = self.records.write().await;
        let start = records.len();
        let sent_at = Utc::now();

        records.extend(batch.into_iter().map(|mut record| {
            record.sent_at = sent_at;
            record
        }));

        let positions = start..records.len();
        let stored = records[positions.clone()].to_vec();
        (positions, stored)
    }

    pub async fn list_all(&self) -> Vec<SentRecord> {
        self.records.read().await.clone()
    }

    /// Records addressed to `address`, compared case-insensitively
    pub async fn list_for(&self, address: &str) -> Vec<SentRecord> {
        let wanted = address.to_lowercase();
        self.records
            .read()
            .await
            .iter()
            .filter(|record| record.to.to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}
