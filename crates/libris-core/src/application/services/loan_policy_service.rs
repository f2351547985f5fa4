//! Loan Policy Service - evaluates a prospective loan or extension.
//!
//! This service coordinates the full borrowing check:
//! 1. Resolve reader, copies and history from the snapshot
//! 2. Run every loan rule, collecting violations
//! 3. Hand back a [`PolicyReport`]; the caller decides whether to persist
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, PolicyReport, ports::LibrarySnapshot},
    domain::{
        BookId, BookItem, BookItemId, DomainError, LoanId, LoanValidator, ReaderId, RuleSettings,
        RuleViolation,
    },
    error::LibrisResult,
};

/// A reader asking to take a set of copies home on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub reader: ReaderId,
    pub loan_date: NaiveDateTime,
    pub items: Vec<BookItemId>,
}

impl LoanRequest {
    pub fn new(
        reader: impl Into<ReaderId>,
        loan_date: NaiveDateTime,
        items: impl IntoIterator<Item = BookItemId>,
    ) -> Self {
        Self {
            reader: reader.into(),
            loan_date,
            items: items.into_iter().collect(),
        }
    }
}

/// Borrowing-policy orchestrator.
pub struct LoanPolicyService {
    snapshot: Box<dyn LibrarySnapshot>,
    validator: LoanValidator,
}

impl LoanPolicyService {
    /// Create a new loan policy service over the given snapshot.
    pub fn new(snapshot: Box<dyn LibrarySnapshot>, rules: RuleSettings) -> Self {
        Self {
            snapshot,
            validator: LoanValidator::new(rules),
        }
    }

    /// Run every loan rule against the request.
    ///
    /// Rule violations end up in the report; a missing entity or a bad
    /// setting aborts with an error.
    #[instrument(
        skip_all,
        fields(
            reader = %request.reader,
            date = %request.loan_date.date(),
            items = request.items.len()
        )
    )]
    pub fn evaluate_loan(&self, request: &LoanRequest) -> LibrisResult<PolicyReport> {
        if request.items.is_empty() {
            return Err(ApplicationError::EmptyLoanRequest.into());
        }

        let reader = self
            .snapshot
            .reader(request.reader)?
            .ok_or(DomainError::MissingArgument { name: "reader" })?;

        let items = request
            .items
            .iter()
            .map(|&id| self.resolve_item(id))
            .collect::<LibrisResult<Vec<_>>>()?;

        let history = self.snapshot.loans_for_reader(reader.id)?;
        let date = request.loan_date;
        let mut report = PolicyReport::new();

        // 1. Request-wide rules
        report.record(self.validator.validate_loan_item_limit(&items))?;
        report.record(
            self.validator
                .validate_daily_loan_limit(&reader, date, &history, &items),
        )?;
        report.record(self.validator.validate_distinct_domains_for_loan(&items))?;
        report.record(
            self.validator
                .validate_max_items_in_period(&reader, date, &history, &items),
        )?;

        // 2. Per-copy rules
        for item in items.iter().filter(|item| !item.is_loanable()) {
            report.push(RuleViolation::ItemNotLoanable { item: item.id });
        }

        // 3. Per-book rules, once per distinct title
        let mut seen: HashSet<BookId> = HashSet::new();
        for item in &items {
            if !seen.insert(item.book_id()) {
                continue;
            }
            let book = item.book();
            let stock = self.snapshot.items_for_book(book.id)?;
            let loaned = self.snapshot.loaned_items_for_book(book.id)?;

            report.record(
                self.validator
                    .validate_book_availability_for_loan(book, &stock, &loaned),
            )?;
            report.record(
                self.validator
                    .validate_book_reborrow_delta(&reader, book, date, &history),
            )?;
        }

        info!(
            permitted = report.is_permitted(),
            violations = ?report.rules(),
            "Loan evaluated"
        );
        Ok(report)
    }

    /// Check whether the loan may be extended once more.
    #[instrument(skip(self), fields(loan = %loan_id))]
    pub fn evaluate_extension(&self, loan_id: LoanId) -> LibrisResult<PolicyReport> {
        let loan = self
            .snapshot
            .loan(loan_id)?
            .ok_or(DomainError::MissingArgument { name: "loan" })?;
        let extensions = self.snapshot.extensions_for_loan(loan_id)?;

        let mut report = PolicyReport::new();
        report.record(self.validator.validate_loan_extension_limit(&loan, &extensions))?;

        info!(permitted = report.is_permitted(), "Extension evaluated");
        Ok(report)
    }

    pub fn rules(&self) -> &RuleSettings {
        self.validator.rules()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn resolve_item(&self, id: BookItemId) -> LibrisResult<Arc<BookItem>> {
        self.snapshot
            .book_item(id)?
            .ok_or_else(|| DomainError::MissingArgument { name: "items" }.into())
    }
}
