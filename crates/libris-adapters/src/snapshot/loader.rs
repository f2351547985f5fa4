//! JSON snapshot documents.
//!
//! A snapshot document is a set of flat records that reference each other
//! by id. Loading resolves those references into the shared entity graph
//! the validators read, and rejects documents whose references dangle.
//!
//! ```json
//! {
//!   "readers":  [{ "id": 1, "name": "Dan", "is_staff": false }],
//!   "domains":  [{ "id": 1, "name": "Science" },
//!                { "id": 2, "name": "Physics", "parent_id": 1 }],
//!   "books":    [{ "id": 1, "title": "Cosmos", "domains": [2] }],
//!   "editions": [{ "id": 1, "book": 1, "publisher": "Polirom", "year": 2019 }],
//!   "items":    [{ "id": 1, "edition": 1 },
//!                { "id": 2, "edition": 1, "reading_room_only": true }],
//!   "loans":    [{ "id": 1, "reader": 1,
//!                  "loan_date": "2025-02-01T09:00:00",
//!                  "return_due_date": "2025-02-15T09:00:00",
//!                  "items": [{ "id": 1, "item": 1 }] }],
//!   "extensions": [{ "id": 1, "loan": 1, "days_extended": 7,
//!                    "extension_date": "2025-02-14T10:00:00" }]
//! }
//! ```
//!
//! Every top-level array is optional. Cyclic domain parents are accepted
//! here; the taxonomy rules report them when they walk the hierarchy.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDateTime;
use libris_core::domain::{
    AuthorId, Book, BookDomain, BookId, BookItem, BookItemId, DomainId, Edition, EditionId,
    ExtensionId, Loan, LoanExtension, LoanId, LoanItem, LoanItemId, Reader, ReaderId,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::AdapterError;
use crate::snapshot::memory::LibraryState;

/// Raw snapshot document, one array per entity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotDocument {
    pub readers: Vec<Reader>,
    pub domains: Vec<BookDomain>,
    pub books: Vec<BookRecord>,
    pub editions: Vec<EditionRecord>,
    pub items: Vec<ItemRecord>,
    pub loans: Vec<LoanRecord>,
    pub extensions: Vec<ExtensionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    #[serde(default)]
    pub domains: Vec<DomainId>,
    #[serde(default)]
    pub authors: Vec<AuthorId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionRecord {
    pub id: EditionId,
    pub book: BookId,
    pub publisher: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default = "first_edition")]
    pub edition_number: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: BookItemId,
    pub edition: EditionId,
    #[serde(default)]
    pub reading_room_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanItemRecord {
    pub id: LoanItemId,
    pub item: BookItemId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: LoanId,
    pub reader: ReaderId,
    pub loan_date: NaiveDateTime,
    pub return_due_date: NaiveDateTime,
    pub items: Vec<LoanItemRecord>,
    /// Returned loans stay in the reader's history but hold no copies.
    #[serde(default)]
    pub returned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    pub id: ExtensionId,
    pub loan: LoanId,
    pub days_extended: u32,
    pub extension_date: NaiveDateTime,
}

fn first_edition() -> u32 {
    1
}

impl SnapshotDocument {
    pub fn from_json_str(json: &str) -> Result<Self, AdapterError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AdapterError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| AdapterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = raw.len(), "Snapshot file read");
        Self::from_json_str(&raw)
    }

    /// Resolve every reference and build the entity graph.
    #[instrument(skip_all, fields(books = self.books.len(), loans = self.loans.len()))]
    pub(crate) fn into_state(self) -> Result<LibraryState, AdapterError> {
        let mut state = LibraryState::default();

        for domain in self.domains {
            let id = domain.id;
            if state.tree.insert(domain).is_some() {
                return Err(AdapterError::invalid(format!("duplicate {id}")));
            }
        }
        let orphan = state.tree.iter().find_map(|domain| {
            domain
                .parent_id
                .filter(|&parent| !state.tree.contains(parent))
                .map(|parent| (domain.id, parent))
        });
        if let Some((domain, parent)) = orphan {
            return Err(dangling(domain, parent));
        }

        for reader in self.readers {
            insert_unique(&mut state.readers, reader.id, Arc::new(reader))?;
        }

        for record in self.books {
            if let Some(&missing) = record.domains.iter().find(|&&d| !state.tree.contains(d)) {
                return Err(dangling(record.id, missing));
            }
            let book = record
                .authors
                .iter()
                .fold(
                    Book::new(record.id, record.title).with_domains(record.domains),
                    |book, &author| book.with_author(author),
                );
            insert_unique(&mut state.books, book.id, Arc::new(book))?;
        }

        let mut editions: HashMap<EditionId, Arc<Edition>> = HashMap::new();
        for record in self.editions {
            let book = state
                .books
                .get(&record.book)
                .ok_or_else(|| dangling(record.id, record.book))?;
            let mut edition = Edition::new(record.id, Arc::clone(book), record.publisher)
                .with_year(record.year)
                .with_edition_number(record.edition_number)
                .with_pages(record.pages);
            if let Some(kind) = record.kind {
                edition = edition.with_kind(kind);
            }
            insert_unique(&mut editions, record.id, Arc::new(edition))?;
        }

        for record in self.items {
            let edition = editions
                .get(&record.edition)
                .map(Arc::clone)
                .ok_or_else(|| dangling(record.id, record.edition))?;
            let item = if record.reading_room_only {
                BookItem::reading_room(record.id, edition)
            } else {
                BookItem::new(record.id, edition)
            };
            insert_unique(&mut state.items, record.id, Arc::new(item))?;
        }

        let mut on_loan: HashMap<BookItemId, LoanId> = HashMap::new();
        for record in self.loans {
            let loan = build_loan(&state, &record)?;
            if !record.returned {
                for item in &loan.items {
                    if let Some(other) = on_loan.insert(item.book_item.id, loan.id) {
                        return Err(AdapterError::invalid(format!(
                            "{} is on open loans {other} and {}",
                            item.book_item.id, loan.id
                        )));
                    }
                }
            } else {
                state.returned.insert(loan.id);
            }
            insert_unique(&mut state.loans, loan.id, loan)?;
        }

        let mut extension_ids = HashMap::new();
        for record in self.extensions {
            if !state.loans.contains_key(&record.loan) {
                return Err(dangling(record.id, record.loan));
            }
            insert_unique(&mut extension_ids, record.id, ())?;
            state.extensions.push(LoanExtension::new(
                record.id,
                record.loan,
                record.days_extended,
                record.extension_date,
            ));
        }

        info!(
            readers = state.readers.len(),
            books = state.books.len(),
            items = state.items.len(),
            domains = state.tree.len(),
            open_loans = state.loans.len() - state.returned.len(),
            "Snapshot loaded"
        );
        Ok(state)
    }
}

fn build_loan(state: &LibraryState, record: &LoanRecord) -> Result<Loan, AdapterError> {
    let reader = state
        .readers
        .get(&record.reader)
        .ok_or_else(|| dangling(record.id, record.reader))?;

    if record.return_due_date < record.loan_date {
        return Err(AdapterError::invalid(format!(
            "{} is due before it was made",
            record.id
        )));
    }

    let mut loan = Loan::new(
        record.id,
        Arc::clone(reader),
        record.loan_date,
        record.return_due_date,
    );
    for line in &record.items {
        let item = state
            .items
            .get(&line.item)
            .ok_or_else(|| dangling(record.id, line.item))?;
        loan = loan.with_item(LoanItem::new(line.id, Arc::clone(item)));
    }
    Ok(loan)
}

fn dangling(owner: impl Display, target: impl Display) -> AdapterError {
    AdapterError::invalid(format!("{owner} references unknown {target}"))
}

fn insert_unique<K, V>(map: &mut HashMap<K, V>, key: K, value: V) -> Result<(), AdapterError>
where
    K: Eq + Hash + Display,
{
    if map.contains_key(&key) {
        return Err(AdapterError::invalid(format!("duplicate {key}")));
    }
    map.insert(key, value);
    Ok(())
}
