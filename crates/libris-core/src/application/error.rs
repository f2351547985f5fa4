//! Application layer errors.
//!
//! These errors represent failures in orchestration, not lending rules.
//! Rule outcomes are `DomainError` / `RuleViolation` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while assembling a snapshot for the validators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A loan request named no items.
    #[error("Loan request contains no items")]
    EmptyLoanRequest,

    /// Snapshot access failed (lock poisoned, etc.).
    #[error("Library snapshot error")]
    SnapshotLockError,

    /// The snapshot source could not provide the data.
    #[error("Library snapshot unavailable: {reason}")]
    SnapshotUnavailable { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyLoanRequest => vec!["Add at least one book item to the loan".into()],
            Self::SnapshotLockError => vec![
                "The library snapshot is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::SnapshotUnavailable { reason } => vec![
                format!("Snapshot source failed: {}", reason),
                "Reload the snapshot and retry".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyLoanRequest => ErrorCategory::Usage,
            Self::SnapshotLockError | Self::SnapshotUnavailable { .. } => ErrorCategory::Internal,
        }
    }
}
