//! Application layer for Libris.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (LoanPolicyService, CatalogPolicyService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! lending rules itself. All rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{CatalogPolicyService, LoanPolicyService, LoanRequest, PolicyReport};

// Re-export port traits (for adapter implementation)
pub use ports::LibrarySnapshot;

pub use error::ApplicationError;
