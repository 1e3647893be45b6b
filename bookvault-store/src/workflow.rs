//! The review state machine.
//!
//! Transition legality lives here rather than inline in the repository so
//! the policy is testable in isolation and can grow intermediate states
//! without touching storage code.

use crate::book::BookStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The decision a reviewer can take on a pending submission.
///
/// There is deliberately no way to express "back to pending": recorded
/// decisions are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewDecision {
    Approve,
    Decline,
}

impl ReviewDecision {
    /// The status a book ends up in when this decision is applied.
    pub fn resulting_status(self) -> BookStatus {
        match self {
            Self::Approve => BookStatus::Approved,
            Self::Decline => BookStatus::Declined,
        }
    }
}

/// Audit metadata computed at the moment a decision is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAudit {
    pub reviewed_by: String,
    pub reviewed_date: DateTime<Utc>,
    pub review_comment: String,
}

/// Why the workflow rejected a transition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The book already left `Pending`; its audit trail must not be
    /// overwritten.
    #[error("book is already {current} and the decision cannot be changed")]
    AlreadyDecided { current: BookStatus },

    /// Decisions must carry a reviewer identity.
    #[error("a reviewer identity is required to record a decision")]
    MissingReviewer,
}

/// Policy object validating review transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewWorkflow;

impl ReviewWorkflow {
    pub fn new() -> Self {
        Self
    }

    /// True when `current` still accepts a review decision.
    pub fn is_reviewable(&self, current: BookStatus) -> bool {
        current == BookStatus::Pending
    }

    /// Validates `decision` against `current` and, if legal, computes the
    /// resulting status plus the audit triple the repository applies.
    pub fn review(
        &self,
        current: BookStatus,
        decision: ReviewDecision,
        reviewed_by: &str,
        comment: &str,
    ) -> Result<(BookStatus, ReviewAudit), TransitionError> {
        if !self.is_reviewable(current) {
            return Err(TransitionError::AlreadyDecided { current });
        }
        if reviewed_by.trim().is_empty() {
            return Err(TransitionError::MissingReviewer);
        }

        Ok((
            decision.resulting_status(),
            ReviewAudit {
                reviewed_by: reviewed_by.to_string(),
                reviewed_date: Utc::now(),
                review_comment: comment.to_string(),
            },
        ))
    }
}
