//! Fixture builders shared by unit tests.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{Book, BookItem, Edition, Loan, LoanItem, Reader};

/// Mid-morning on the given day.
pub fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .expect("valid fixture date")
}

pub fn reader(id: u32) -> Arc<Reader> {
    Arc::new(Reader::new(id, format!("Reader {id}")))
}

pub fn staff(id: u32) -> Arc<Reader> {
    Arc::new(Reader::staff(id, format!("Staff {id}")))
}

pub fn book(id: u32, domains: &[u32]) -> Arc<Book> {
    Arc::new(Book::new(id, format!("Book {id}")).with_domains(domains.iter().copied()))
}

pub fn copy(id: u32, book: &Arc<Book>) -> Arc<BookItem> {
    Arc::new(BookItem::new(id, edition(book)))
}

pub fn restricted_copy(id: u32, book: &Arc<Book>) -> Arc<BookItem> {
    Arc::new(BookItem::reading_room(id, edition(book)))
}

/// `count` circulating copies with ids `first_id..`.
pub fn copies(book: &Arc<Book>, first_id: u32, count: u32) -> Vec<Arc<BookItem>> {
    (first_id..first_id + count).map(|id| copy(id, book)).collect()
}

/// A loan whose loan-item ids mirror the copy ids.
pub fn loan(id: u32, reader: &Arc<Reader>, date: NaiveDateTime, items: &[Arc<BookItem>]) -> Loan {
    items.iter().fold(
        Loan::new(id, Arc::clone(reader), date, date + chrono::Duration::days(14)),
        |loan, item| loan.with_item(LoanItem::new(item.id.get(), Arc::clone(item))),
    )
}

fn edition(book: &Arc<Book>) -> Arc<Edition> {
    Arc::new(
        Edition::new(book.id.get(), Arc::clone(book), "Test Press")
            .with_year(2024)
            .with_pages(100),
    )
}
