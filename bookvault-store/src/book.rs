use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Review status of a submitted book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookStatus {
    /// Awaiting a review decision. The initial state.
    #[default]
    Pending,
    /// Accepted by a reviewer. Terminal.
    Approved,
    /// Rejected by a reviewer. Terminal.
    Declined,
}

impl BookStatus {
    /// True once a review decision has been recorded.
    pub fn is_decided(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Declined => "declined",
        };
        f.write_str(s)
    }
}

/// A stored book record.
///
/// `id` is assigned by the repository and immutable. The audit fields are
/// `None` until the one transition out of [`BookStatus::Pending`] sets them,
/// and are never written again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub isbn: String,
    pub description: String,
    pub submitted_by: String,
    pub status: BookStatus,
    pub reviewed_by: Option<String>,
    pub reviewed_date: Option<DateTime<Utc>>,
    pub review_comment: Option<String>,
    /// Path of the encrypted document artifact, if one was attached. The
    /// store only ever holds this reference, never plaintext.
    pub encrypted_document_path: Option<PathBuf>,
}

/// A submission as it arrives from the boundary layer, already validated.
///
/// Carries no id; identity is assigned by the repository alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookSubmission {
    pub title: String,
    pub author: String,
    pub category: String,
    pub isbn: String,
    pub description: String,
    pub submitted_by: String,
    /// Explicit initial status. `None` becomes `Pending`; tests use `Some`
    /// to pre-seed state, production callers should leave it unset.
    pub status: Option<BookStatus>,
    pub encrypted_document_path: Option<PathBuf>,
}
