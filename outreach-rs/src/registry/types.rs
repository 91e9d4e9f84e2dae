//! Registry types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{OutreachError, Result};

/// A recipient organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Display name
    pub name: String,
    /// Postal address (`address` on the wire)
    #[serde(rename = "address")]
    pub physical_address: String,
    /// Email address, the registry key (case-sensitive)
    pub email: String,
}

impl Organization {
    /// Fields available to templates rendered for this organization
    ///
    /// `address` is kept as an alias of `physical_address` so templates written
    /// against the wire names keep working.
    pub fn template_fields(&self) -> HashMap<String, String> {
        HashMap::from([
            ("name".to_string(), self.name.clone()),
            ("physical_address".to_string(), self.physical_address.clone()),
            ("address".to_string(), self.physical_address.clone()),
            ("email".to_string(), self.email.clone()),
        ])
    }
}

/// One entry of a directory ingestion payload, before field checks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationEntry {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

impl OrganizationEntry {
    pub fn new(name: &str, address: &str, email: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            address: Some(address.to_string()),
            email: Some(email.to_string()),
        }
    }

    /// Decode one element of an ingestion payload
    ///
    /// A field of the wrong type is reported against its entry position.
    pub fn from_json(index: usize, value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| {
            OutreachError::Validation(format!("Entry {} has an invalid field: {}", index, e))
        })
    }

    /// Check that every required field is present
    ///
    /// `index` is the entry position in the payload, used in the error text.
    pub fn into_organization(self, index: usize) -> Result<Organization> {
        let missing = |field: &str| {
            OutreachError::Validation(format!("Entry {} is missing required field '{}'", index, field))
        };

        Ok(Organization {
            email: self.email.ok_or_else(|| missing("email"))?,
            name: self.name.ok_or_else(|| missing("name"))?,
            physical_address: self.address.ok_or_else(|| missing("address"))?,
        })
    }
}
