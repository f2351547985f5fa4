// ============================================================================
// domain/error.rs - USAGE ERRORS AND RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

use crate::domain::value_objects::{BookId, BookItemId, DomainId, LoanId};

/// A lending rule said "no".
///
/// Violations are expected outcomes: the caller rejects the requested
/// operation and shows the message to the reader or librarian. Each variant
/// carries the numbers needed to render that message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    // ========================================================================
    // Loan size and frequency
    // ========================================================================
    #[error("A loan cannot contain more than {max} items.")]
    LoanItemLimitExceeded { count: usize, max: usize },

    #[error("Daily loan limit exceeded. Maximum allowed is {max} items per day.")]
    DailyLoanLimitExceeded { attempted: usize, max: usize },

    #[error("Maximum of {max} items allowed in a period of {period_days} days.")]
    PeriodLimitExceeded {
        attempted: usize,
        max: usize,
        period_days: i64,
    },

    #[error(
        "When borrowing three or more items, at least two distinct domains are required \
         ({distinct_domains} found across {items} items)."
    )]
    InsufficientDomainDiversity {
        items: usize,
        distinct_domains: usize,
    },

    // ========================================================================
    // Availability
    // ========================================================================
    #[error("Cannot loan {book}: it has no physical copies.")]
    NoCopiesExist { book: BookId },

    #[error("All copies of {book} are restricted to the reading room.")]
    AllCopiesRestricted { book: BookId },

    #[error(
        "Not enough available copies to allow loaning {book} \
         (available {available}, required {required})."
    )]
    InsufficientAvailability {
        book: BookId,
        available: usize,
        required: usize,
    },

    #[error("Copy {item} is restricted to the reading room and cannot be loaned.")]
    ItemNotLoanable { item: BookItemId },

    // ========================================================================
    // History
    // ========================================================================
    #[error("The book cannot be borrowed again within {cooldown_days} days (last loan {days_since} days ago).")]
    ReborrowTooSoon {
        book: BookId,
        days_since: i64,
        cooldown_days: i64,
    },

    #[error("Loan cannot be extended more than {max} times.")]
    ExtensionLimitExceeded {
        loan: LoanId,
        count: usize,
        max: usize,
    },

    // ========================================================================
    // Taxonomy
    // ========================================================================
    #[error("A book cannot be assigned to more than {max} domains.")]
    TooManyDomainsForBook { count: usize, max: usize },

    #[error("Domain conflict: '{domain}' is a subdomain of '{ancestor}'.")]
    DomainConflict { domain: String, ancestor: String },
}

impl RuleViolation {
    /// Stable rule name, used in logs and reports.
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::LoanItemLimitExceeded { .. } => "loan-item-limit",
            Self::DailyLoanLimitExceeded { .. } => "daily-loan-limit",
            Self::PeriodLimitExceeded { .. } => "period-limit",
            Self::InsufficientDomainDiversity { .. } => "domain-diversity",
            Self::NoCopiesExist { .. }
            | Self::AllCopiesRestricted { .. }
            | Self::InsufficientAvailability { .. } => "book-availability",
            Self::ItemNotLoanable { .. } => "item-loanable",
            Self::ReborrowTooSoon { .. } => "reborrow-delta",
            Self::ExtensionLimitExceeded { .. } => "extension-limit",
            Self::TooManyDomainsForBook { .. } => "max-domains-per-book",
            Self::DomainConflict { .. } => "ancestor-domain-conflict",
        }
    }
}

/// Root domain error type.
///
/// Usage errors (a missing entity, a non-positive setting, corrupted
/// taxonomy) are defects in the caller or the rulebook. Rule violations are
/// wrapped in [`DomainError::Violation`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Usage Errors
    // ========================================================================
    #[error("Required argument missing: {name}")]
    MissingArgument { name: &'static str },

    #[error("Rule setting '{setting}' must be greater than zero (got {value})")]
    InvalidSetting { setting: &'static str, value: i32 },

    #[error("Domain hierarchy above '{domain}' is cyclic (revisited {repeated})")]
    CyclicDomainHierarchy { domain: String, repeated: DomainId },

    // ========================================================================
    // Rule Violations
    // ========================================================================
    #[error(transparent)]
    Violation(#[from] RuleViolation),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingArgument { name } => vec![
                format!("The '{}' argument could not be resolved", name),
                "Check that the snapshot contains every referenced entity".into(),
            ],
            Self::InvalidSetting { setting, .. } => vec![
                format!("Set '{}' to a positive integer in the rulebook", setting),
                format!("Or override it with LIBRIS_RULES__{}", setting.to_uppercase()),
            ],
            Self::CyclicDomainHierarchy { domain, .. } => vec![
                format!("Inspect the parent chain of '{}'", domain),
                "Every domain must eventually reach a root".into(),
            ],
            Self::Violation(RuleViolation::ReborrowTooSoon { cooldown_days, .. }) => vec![
                format!("Wait until {} days have passed since the last loan", cooldown_days),
            ],
            Self::Violation(RuleViolation::InsufficientDomainDiversity { .. }) => vec![
                "Add an item from a different subject domain".into(),
                "Or borrow fewer than three items".into(),
            ],
            Self::Violation(RuleViolation::DomainConflict { ancestor, .. }) => vec![
                format!("Remove either the subdomain or '{}' from the book", ancestor),
            ],
            Self::Violation(_) => vec!["Reduce the request to fit the lending policy".into()],
        }
    }

    /// Error category for display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingArgument { .. }
            | Self::InvalidSetting { .. }
            | Self::CyclicDomainHierarchy { .. } => ErrorCategory::Usage,
            Self::Violation(_) => ErrorCategory::Violation,
        }
    }

    /// The wrapped violation, if this is one.
    pub fn as_violation(&self) -> Option<&RuleViolation> {
        match self {
            Self::Violation(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Violation,
}
