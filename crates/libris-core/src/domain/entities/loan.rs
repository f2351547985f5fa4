use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{
    entities::{catalog::BookItem, reader::Reader},
    value_objects::{BookId, ExtensionId, LoanId, LoanItemId, ReaderId},
};

/// A single copy included in a loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanItem {
    pub id: LoanItemId,
    pub book_item: Arc<BookItem>,
}

impl LoanItem {
    pub fn new(id: impl Into<LoanItemId>, book_item: Arc<BookItem>) -> Self {
        Self {
            id: id.into(),
            book_item,
        }
    }

    pub fn book_id(&self) -> BookId {
        self.book_item.book_id()
    }
}

/// A loan made by a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub id: LoanId,
    pub reader: Arc<Reader>,
    pub loan_date: NaiveDateTime,
    pub return_due_date: NaiveDateTime,
    pub items: Vec<LoanItem>,
}

impl Loan {
    pub fn new(
        id: impl Into<LoanId>,
        reader: Arc<Reader>,
        loan_date: NaiveDateTime,
        return_due_date: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            reader,
            loan_date,
            return_due_date,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: LoanItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Calendar day of the loan; time of day never matters to the rules.
    pub fn loan_day(&self) -> NaiveDate {
        self.loan_date.date()
    }

    pub fn belongs_to(&self, reader: ReaderId) -> bool {
        self.reader.id == reader
    }

    pub fn contains_book(&self, book: BookId) -> bool {
        self.items.iter().any(|item| item.book_id() == book)
    }
}

/// An extension applied to a loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanExtension {
    pub id: ExtensionId,
    pub loan_id: LoanId,
    pub days_extended: u32,
    pub extension_date: NaiveDateTime,
}

impl LoanExtension {
    pub fn new(
        id: impl Into<ExtensionId>,
        loan_id: impl Into<LoanId>,
        days_extended: u32,
        extension_date: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            loan_id: loan_id.into(),
            days_extended,
            extension_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::catalog::{Book, Edition};
    use chrono::{Duration, NaiveDate};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn copy_of(book_id: u32, item_id: u32) -> Arc<BookItem> {
        let book = Arc::new(Book::new(book_id, "Title"));
        let edition = Arc::new(Edition::new(book_id, book, "Publisher"));
        Arc::new(BookItem::new(item_id, edition))
    }

    #[test]
    fn loan_day_drops_time_of_day() {
        let date = at(2025, 3, 14, 17);
        let loan = Loan::new(1, Arc::new(Reader::new(1, "Ana")), date, date + Duration::days(14));
        assert_eq!(loan.loan_day(), NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn loan_tracks_items_and_books() {
        let date = at(2025, 3, 14, 9);
        let loan = Loan::new(1, Arc::new(Reader::new(1, "Ana")), date, date)
            .with_item(LoanItem::new(1, copy_of(7, 70)))
            .with_item(LoanItem::new(2, copy_of(8, 80)));

        assert_eq!(loan.item_count(), 2);
        assert!(loan.contains_book(BookId::new(8)));
        assert!(!loan.contains_book(BookId::new(9)));
        assert!(loan.belongs_to(ReaderId::new(1)));
        assert!(!loan.belongs_to(ReaderId::new(2)));
    }
}
