//! Draft storage
//!
//! Drafts are created open, edited any number of times, and leave the store
//! only through `DraftStore::take_and_remove`.

pub mod store;
pub mod types;

pub use store::DraftStore;
pub use types::{CreateDraftRequest, Draft, DraftStatus, UpdateDraftRequest};
