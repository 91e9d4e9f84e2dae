//! Dispatch request and result types

use serde::{Deserialize, Serialize};

/// Immediate send of a template to a recipient list
#[derive(Debug, Clone, Deserialize)]
pub struct SendRequest {
    pub template: String,
    pub recipients: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
}

/// Per-recipient outcome of a dispatch call
///
/// Both lists keep request order; together they hold every requested
/// recipient exactly once per occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub sent: Vec<String>,
    pub skipped: Vec<String>,
}
