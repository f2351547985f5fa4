//! Catalog entities: authors, books, editions and physical copies.
//!
//! Ownership runs copy → edition → book through shared [`Arc`] handles, so a
//! [`BookItem`] can always answer "which book am I?" without a lookup.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AuthorId, BookId, BookItemId, DomainId, EditionId};

/// An author of books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    #[serde(default)]
    pub books: Vec<BookId>,
}

impl Author {
    pub fn new(id: impl Into<AuthorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            books: Vec::new(),
        }
    }
}

/// A book title with its subject domains.
///
/// `domains` is kept exactly as assigned, duplicates included; the
/// max-domains rule counts the list as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub domains: Vec<DomainId>,
    pub authors: Vec<AuthorId>,
}

impl Book {
    pub fn new(id: impl Into<BookId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            domains: Vec::new(),
            authors: Vec::new(),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<DomainId>) -> Self {
        self.domains.push(domain.into());
        self
    }

    pub fn with_domains<I, D>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DomainId>,
    {
        self.domains.extend(domains.into_iter().map(Into::into));
        self
    }

    pub fn with_author(mut self, author: impl Into<AuthorId>) -> Self {
        self.authors.push(author.into());
        self
    }

    pub fn has_domain(&self, domain: DomainId) -> bool {
        self.domains.contains(&domain)
    }
}

/// A specific edition of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edition {
    pub id: EditionId,
    pub book: Arc<Book>,
    pub publisher: String,
    pub year: i32,
    pub edition_number: u32,
    pub pages: u32,
    /// Free-form edition type ("hardcover", "paperback", ...).
    pub kind: Option<String>,
}

impl Edition {
    pub fn new(id: impl Into<EditionId>, book: Arc<Book>, publisher: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            book,
            publisher: publisher.into(),
            year: 0,
            edition_number: 1,
            pages: 0,
            kind: None,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_edition_number(mut self, number: u32) -> Self {
        self.edition_number = number;
        self
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn book_id(&self) -> BookId {
        self.book.id
    }
}

/// One physical copy of an edition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookItem {
    pub id: BookItemId,
    pub edition: Arc<Edition>,
    /// Copy may only be read on the premises.
    pub reading_room_only: bool,
}

impl BookItem {
    /// A circulating copy.
    pub fn new(id: impl Into<BookItemId>, edition: Arc<Edition>) -> Self {
        Self {
            id: id.into(),
            edition,
            reading_room_only: false,
        }
    }

    /// A copy restricted to the reading room.
    pub fn reading_room(id: impl Into<BookItemId>, edition: Arc<Edition>) -> Self {
        Self {
            reading_room_only: true,
            ..Self::new(id, edition)
        }
    }

    pub fn book(&self) -> &Book {
        &self.edition.book
    }

    pub fn book_id(&self) -> BookId {
        self.edition.book.id
    }

    pub fn is_loanable(&self) -> bool {
        !self.reading_room_only
    }
}
