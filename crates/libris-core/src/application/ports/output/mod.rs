//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `libris-adapters` crate provides implementations.

use std::sync::Arc;

use crate::domain::{
    Book, BookId, BookItem, BookItemId, DomainTree, Loan, LoanExtension, LoanId, Reader, ReaderId,
};
use crate::error::LibrisResult;

/// Port for read access to a consistent snapshot of library state.
///
/// Implemented by:
/// - `libris_adapters::snapshot::InMemorySnapshot` (in-process snapshot)
///
/// ## Design Notes
///
/// - Lookups by id return `Ok(None)` when the entity is absent; the services
///   turn that into `DomainError::MissingArgument`
/// - Snapshot freshness is the implementor's concern
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
pub trait LibrarySnapshot: Send + Sync {
    fn reader(&self, id: ReaderId) -> LibrisResult<Option<Arc<Reader>>>;

    fn book(&self, id: BookId) -> LibrisResult<Option<Arc<Book>>>;

    fn book_item(&self, id: BookItemId) -> LibrisResult<Option<Arc<BookItem>>>;

    fn loan(&self, id: LoanId) -> LibrisResult<Option<Loan>>;

    /// The whole subject taxonomy.
    fn domain_tree(&self) -> LibrisResult<DomainTree>;

    /// Every loan the reader ever made, returned or not.
    fn loans_for_reader(&self, id: ReaderId) -> LibrisResult<Vec<Loan>>;

    /// Every physical copy of the book, reading-room copies included.
    fn items_for_book(&self, id: BookId) -> LibrisResult<Vec<Arc<BookItem>>>;

    /// Copies of the book that are out on a loan right now.
    fn loaned_items_for_book(&self, id: BookId) -> LibrisResult<Vec<Arc<BookItem>>>;

    fn extensions_for_loan(&self, id: LoanId) -> LibrisResult<Vec<LoanExtension>>;
}
