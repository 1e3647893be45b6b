//! The book repository.

use crate::book::{Book, BookStatus, BookSubmission};
use crate::error::UpdateError;
use crate::workflow::{ReviewDecision, ReviewWorkflow};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// In-memory store of book records.
///
/// One mutex guards both the identity counter and the record table, so id
/// assignment is atomic and a status transition cannot race another
/// transition on the same record. All accessors return copies; internal
/// storage is never exposed.
#[derive(Debug)]
pub struct BookRepository {
    workflow: ReviewWorkflow,
    inner: Mutex<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    next_id: u64,
    // Ids are assigned in increasing order, so map order is insertion order.
    books: BTreeMap<u64, Book>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self {
            workflow: ReviewWorkflow::new(),
            inner: Mutex::new(StoreInner {
                next_id: 1,
                books: BTreeMap::new(),
            }),
        }
    }

    /// Stores a submission under the next identity and returns the stored
    /// record. Status defaults to `Pending` when the submission left it
    /// unset.
    pub fn add_book(&self, submission: BookSubmission) -> Book {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        let book = Book {
            id,
            title: submission.title,
            author: submission.author,
            category: submission.category,
            isbn: submission.isbn,
            description: submission.description,
            submitted_by: submission.submitted_by,
            status: submission.status.unwrap_or(BookStatus::Pending),
            reviewed_by: None,
            reviewed_date: None,
            review_comment: None,
            encrypted_document_path: submission.encrypted_document_path,
        };
        debug!(id, title = %book.title, "book submitted");
        inner.books.insert(id, book.clone());
        book
    }

    /// Point-in-time snapshot of every record, in insertion order.
    pub fn all_books(&self) -> Vec<Book> {
        self.lock().books.values().cloned().collect()
    }

    /// Looks up a record by id. `None` is the routine absent case, not an
    /// error.
    pub fn book_by_id(&self, id: u64) -> Option<Book> {
        self.lock().books.get(&id).cloned()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().books.is_empty()
    }

    /// Applies a review decision to the book with `id`.
    ///
    /// Delegates legality to [`ReviewWorkflow`]; on a legal transition the
    /// status and audit fields are set under the same lock section that read
    /// the current status, and the updated record is returned. On
    /// [`UpdateError`] nothing is mutated.
    pub fn update_status(
        &self,
        id: u64,
        decision: ReviewDecision,
        reviewed_by: &str,
        comment: &str,
    ) -> Result<Book, UpdateError> {
        let mut inner = self.lock();
        let book = inner.books.get_mut(&id).ok_or(UpdateError::NotFound(id))?;

        let (status, audit) = self
            .workflow
            .review(book.status, decision, reviewed_by, comment)?;

        book.status = status;
        book.reviewed_by = Some(audit.reviewed_by);
        book.reviewed_date = Some(audit.reviewed_date);
        book.review_comment = Some(audit.review_comment);

        info!(id, status = %book.status, reviewer = reviewed_by, "review decision recorded");
        Ok(book.clone())
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // A poisoning panic cannot leave a half-applied mutation: every
        // write completes before the guard is released.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for BookRepository {
    fn default() -> Self {
        Self::new()
    }
}
