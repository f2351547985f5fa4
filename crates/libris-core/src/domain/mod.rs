// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Libris.
//!
//! This module contains the lending rules and the entities they read.
//! Snapshot loading, configuration files and log sinks are handled via
//! ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable inputs**: Validators only borrow the snapshot
//! - **Results, not panics**: Every rule returns `Result<(), DomainError>`
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod settings;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    Ancestors, Author, Book, BookDomain, BookItem, DomainTree, Edition, Loan, LoanExtension,
    LoanItem, Reader,
};

pub use error::{DomainError, ErrorCategory, RuleViolation};

pub use settings::RuleSettings;

pub use validation::{DomainValidator, LoanValidator, StaffRelaxation, effective_for_reader};

pub use value_objects::{
    AuthorId, BookId, BookItemId, DomainId, EditionId, ExtensionId, LoanId, LoanItemId, ReaderId,
};
