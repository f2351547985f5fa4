//! Libris Core - Lending Policy Engine
//!
//! This crate provides the domain and application layers for the Libris
//! lending-policy engine, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        Caller (circulation desk)        │
//! │     (Persists loans it was allowed)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (LoanPolicyService, CatalogPolicyService)│
//! │        Collects a PolicyReport          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │         (Driven: LibrarySnapshot)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     libris-adapters (Infrastructure)    │
//! │ (InMemorySnapshot, RulebookLoader, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (LoanValidator, DomainValidator, Loan) │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use libris_core::{
//!     application::{LoanPolicyService, LoanRequest},
//!     domain::{BookItemId, RuleSettings},
//! };
//! # fn demo(snapshot: Box<dyn libris_core::application::LibrarySnapshot>, when: chrono::NaiveDateTime) {
//!
//! // 1. Build the service over a snapshot adapter
//! let service = LoanPolicyService::new(snapshot, RuleSettings::default());
//!
//! // 2. Ask whether reader 7 may take two copies home
//! let request = LoanRequest::new(7, when, [BookItemId::new(1), BookItemId::new(2)]);
//! let report = service.evaluate_loan(&request).unwrap();
//! for violation in report.violations() {
//!     println!("{}: {violation}", violation.rule());
//! }
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

#[cfg(test)]
mod test_support;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CatalogPolicyService, LoanPolicyService, LoanRequest, PolicyReport,
        ports::LibrarySnapshot,
    };
    pub use crate::domain::{
        Book, BookDomain, BookId, BookItem, BookItemId, DomainError, DomainId, DomainTree,
        DomainValidator, Edition, Loan, LoanExtension, LoanId, LoanItem, LoanValidator, Reader,
        ReaderId, RuleSettings, RuleViolation,
    };
    pub use crate::error::{LibrisError, LibrisResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
