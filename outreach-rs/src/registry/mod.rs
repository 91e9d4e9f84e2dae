//! Nonprofit directory
//!
//! Holds the recipient organizations, keyed by email address. Entries are
//! only ever added; the first write for an address wins.

pub mod manager;
pub mod types;

pub use manager::OrganizationRegistry;
pub use types::{Organization, OrganizationEntry};
