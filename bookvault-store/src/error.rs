//! Error types for the store layer.

use crate::workflow::TransitionError;
use thiserror::Error;

/// Why an `update_status` call did not apply.
///
/// Both variants are expected, routine outcomes (callers race and pass
/// stale ids), so they are values to branch on, never panics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpdateError {
    /// No book with the requested id exists.
    #[error("no book with id {0}")]
    NotFound(u64),

    /// The workflow rejected the transition; nothing was mutated.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}
