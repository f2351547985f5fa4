pub mod catalog;
pub mod loan;
pub mod reader;
pub mod taxonomy;

pub use crate::domain::DomainError;
pub use catalog::{Author, Book, BookItem, Edition};
pub use loan::{Loan, LoanExtension, LoanItem};
pub use reader::Reader;
pub use taxonomy::{Ancestors, BookDomain, DomainTree};
