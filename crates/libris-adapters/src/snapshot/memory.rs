//! In-memory library snapshot.

use std::{
    collections::{HashMap, HashSet},
    path::Path,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use libris_core::{
    application::{ApplicationError, ports::LibrarySnapshot},
    domain::{
        Book, BookDomain, BookId, BookItem, BookItemId, DomainTree, Loan, LoanExtension, LoanId,
        Reader, ReaderId,
    },
    error::LibrisResult,
};
use tracing::debug;

use crate::error::AdapterError;
use crate::snapshot::loader::SnapshotDocument;

/// Everything the snapshot knows, keyed by id.
#[derive(Debug, Default)]
pub(crate) struct LibraryState {
    pub(crate) readers: HashMap<ReaderId, Arc<Reader>>,
    pub(crate) books: HashMap<BookId, Arc<Book>>,
    pub(crate) items: HashMap<BookItemId, Arc<BookItem>>,
    pub(crate) loans: HashMap<LoanId, Loan>,
    /// Loans whose copies are back on the shelf.
    pub(crate) returned: HashSet<LoanId>,
    pub(crate) extensions: Vec<LoanExtension>,
    pub(crate) tree: DomainTree,
}

impl LibraryState {
    fn open_loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans
            .values()
            .filter(|loan| !self.returned.contains(&loan.id))
    }
}

/// Thread-safe in-memory snapshot.
///
/// Clones share the same state, so a caller can keep one handle to record
/// the loans it persists while a service reads through another.
#[derive(Clone, Default)]
pub struct InMemorySnapshot {
    inner: Arc<RwLock<LibraryState>>,
}

impl InMemorySnapshot {
    /// Create a new empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a parsed document, resolving its references.
    pub fn from_document(document: SnapshotDocument) -> Result<Self, AdapterError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(document.into_state()?)),
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, AdapterError> {
        Self::from_document(SnapshotDocument::from_json_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AdapterError> {
        Self::from_document(SnapshotDocument::from_path(path)?)
    }

    pub fn insert_reader(&self, reader: Reader) -> LibrisResult<Arc<Reader>> {
        let reader = Arc::new(reader);
        self.write()?.readers.insert(reader.id, Arc::clone(&reader));
        Ok(reader)
    }

    pub fn insert_domain(&self, domain: BookDomain) -> LibrisResult<()> {
        self.write()?.tree.insert(domain);
        Ok(())
    }

    /// Register a copy, and its book if not yet known.
    pub fn insert_item(&self, item: Arc<BookItem>) -> LibrisResult<()> {
        let mut state = self.write()?;
        state
            .books
            .entry(item.book_id())
            .or_insert_with(|| Arc::clone(&item.edition.book));
        state.items.insert(item.id, item);
        Ok(())
    }

    /// Record a loan that was granted; its copies count as loaned until
    /// [`mark_returned`](Self::mark_returned).
    pub fn record_loan(&self, loan: Loan) -> LibrisResult<()> {
        let mut state = self.write()?;
        for line in &loan.items {
            state
                .items
                .entry(line.book_item.id)
                .or_insert_with(|| Arc::clone(&line.book_item));
        }
        state
            .readers
            .entry(loan.reader.id)
            .or_insert_with(|| Arc::clone(&loan.reader));
        debug!(loan = %loan.id, items = loan.item_count(), "Loan recorded");
        state.returned.remove(&loan.id);
        state.loans.insert(loan.id, loan);
        Ok(())
    }

    /// Returns `false` if the loan is unknown.
    pub fn mark_returned(&self, loan: LoanId) -> LibrisResult<bool> {
        let mut state = self.write()?;
        if !state.loans.contains_key(&loan) {
            return Ok(false);
        }
        state.returned.insert(loan);
        Ok(true)
    }

    pub fn record_extension(&self, extension: LoanExtension) -> LibrisResult<()> {
        self.write()?.extensions.push(extension);
        Ok(())
    }

    /// Number of loans not yet returned.
    pub fn open_loan_count(&self) -> LibrisResult<usize> {
        Ok(self.read()?.open_loans().count())
    }

    // -------------------------------------------------------------------------
    // Lock helpers
    // -------------------------------------------------------------------------

    fn read(&self) -> LibrisResult<RwLockReadGuard<'_, LibraryState>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::SnapshotLockError.into())
    }

    fn write(&self) -> LibrisResult<RwLockWriteGuard<'_, LibraryState>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::SnapshotLockError.into())
    }
}

impl LibrarySnapshot for InMemorySnapshot {
    fn reader(&self, id: ReaderId) -> LibrisResult<Option<Arc<Reader>>> {
        Ok(self.read()?.readers.get(&id).cloned())
    }

    fn book(&self, id: BookId) -> LibrisResult<Option<Arc<Book>>> {
        Ok(self.read()?.books.get(&id).cloned())
    }

    fn book_item(&self, id: BookItemId) -> LibrisResult<Option<Arc<BookItem>>> {
        Ok(self.read()?.items.get(&id).cloned())
    }

    fn loan(&self, id: LoanId) -> LibrisResult<Option<Loan>> {
        Ok(self.read()?.loans.get(&id).cloned())
    }

    fn domain_tree(&self) -> LibrisResult<DomainTree> {
        Ok(self.read()?.tree.clone())
    }

    fn loans_for_reader(&self, id: ReaderId) -> LibrisResult<Vec<Loan>> {
        let state = self.read()?;
        let mut loans: Vec<Loan> = state
            .loans
            .values()
            .filter(|loan| loan.belongs_to(id))
            .cloned()
            .collect();
        loans.sort_by_key(|loan| (loan.loan_date, loan.id));
        Ok(loans)
    }

    fn items_for_book(&self, id: BookId) -> LibrisResult<Vec<Arc<BookItem>>> {
        let state = self.read()?;
        let mut items: Vec<Arc<BookItem>> = state
            .items
            .values()
            .filter(|item| item.book_id() == id)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    fn loaned_items_for_book(&self, id: BookId) -> LibrisResult<Vec<Arc<BookItem>>> {
        let state = self.read()?;
        let mut items: Vec<Arc<BookItem>> = state
            .open_loans()
            .flat_map(|loan| loan.items.iter())
            .filter(|line| line.book_id() == id)
            .map(|line| Arc::clone(&line.book_item))
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    fn extensions_for_loan(&self, id: LoanId) -> LibrisResult<Vec<LoanExtension>> {
        Ok(self
            .read()?
            .extensions
            .iter()
            .filter(|ext| ext.loan_id == id)
            .cloned()
            .collect())
    }
}
