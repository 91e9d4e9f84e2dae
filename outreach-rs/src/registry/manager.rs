//! Organization registry with insertion-ordered storage

use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::Result;
use crate::registry::types::{Organization, OrganizationEntry};

#[derive(Default)]
struct RegistryInner {
    /// email -> position in `entries`
    index: HashMap<String, usize>,
    entries: Vec<Organization>,
}

/// Directory of known recipient organizations
pub struct OrganizationRegistry {
    inner: RwLock<RegistryInner>,
}

impl OrganizationRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner::default()),
        }
    }

    /// Insert every entry whose email is not registered yet
    ///
    /// Entries are processed in order under one write lock. An existing email
    /// is skipped. The first malformed entry stops the call with a validation
    /// error; entries before it stay inserted.
    ///
    /// Returns the number of newly inserted organizations.
    pub async fn upsert(&self, entries: Vec<OrganizationEntry>) -> Result<usize> {
        let mut inner = self.inner.write().await;
        let mut inserted = 0;

        for (index, entry) in entries.into_iter().enumerate() {
            let organization = match entry.into_organization(index) {
                Ok(organization) => organization,
                Err(e) => {
                    if inserted > 0 {
                        info!("Registered {} organization(s) before rejecting entry {}", inserted, index);
                    }
                    return Err(e);
                }
            };

            if inner.index.contains_key(&organization.email) {
                debug!("Organization {} already registered, skipping", organization.email);
                continue;
            }

            let position = inner.entries.len();
            inner.index.insert(organization.email.clone(), position);
            inner.entries.push(organization);
            inserted += 1;
        }

        info!("Registered {} new organization(s)", inserted);
        Ok(inserted)
    }

    /// Find an organization by exact email
    pub async fn lookup(&self, email: &str) -> Option<Organization> {
        let inner = self.inner.read().await;
        inner
            .index
            .get(email)
            .map(|&position| inner.entries[position].clone())
    }

    /// Snapshot of all organizations in insertion order
    pub async fn list_all(&self) -> Vec<Organization> {
        self.inner.read().await.entries.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for OrganizationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
