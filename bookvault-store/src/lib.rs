//! Book submission and review workflow store.
//!
//! Single source of truth for book records: the repository assigns
//! identities atomically, hands out snapshot copies only, and delegates
//! every status transition to the review workflow so a recorded decision can
//! never be silently overwritten.
//!
//! The repository is an explicit object; construct one with
//! [`BookRepository::new`] and share it behind an `Arc`. There is no global
//! state.

mod book;
mod error;
mod repository;
mod workflow;

pub use book::{Book, BookStatus, BookSubmission};
pub use error::UpdateError;
pub use repository::BookRepository;
pub use workflow::{ReviewAudit, ReviewDecision, ReviewWorkflow, TransitionError};
