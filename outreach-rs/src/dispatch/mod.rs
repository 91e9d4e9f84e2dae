//! Recipient resolution and message dispatch
//!
//! # Flow
//! ```text
//! recipients ─► [Registry lookup] ─┬─ absent ─► skipped
//!                                  └─ found ──► [render] ─► batch
//! batch (all rendered) ─► [Audit Log append] ─► [MailTransport]
//! ```
//!
//! Rendering for the whole call finishes before the first audit append, so
//! a template error leaves the audit log untouched.

pub mod dispatcher;
pub mod types;

pub use dispatcher::Dispatcher;
pub use types::{DispatchReport, SendRequest};
