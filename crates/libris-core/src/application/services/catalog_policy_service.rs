//! Catalog Policy Service - book/domain assignment checks.
//!
//! Separated from LoanPolicyService for single responsibility.

use tracing::{info, instrument};

use crate::{
    application::{PolicyReport, ports::LibrarySnapshot},
    domain::{BookDomain, BookId, DomainError, DomainId, DomainTree, DomainValidator, RuleSettings},
    error::LibrisResult,
};

/// Service for taxonomy assignment checks.
pub struct CatalogPolicyService {
    snapshot: Box<dyn LibrarySnapshot>,
    validator: DomainValidator,
}

impl CatalogPolicyService {
    /// Create a new catalog policy service.
    pub fn new(snapshot: Box<dyn LibrarySnapshot>, rules: RuleSettings) -> Self {
        Self {
            snapshot,
            validator: DomainValidator::new(rules),
        }
    }

    /// Check a proposed set of domains for a book.
    #[instrument(skip_all, fields(book = %book, domains = domains.len()))]
    pub fn evaluate_assignment(
        &self,
        book: BookId,
        domains: &[DomainId],
    ) -> LibrisResult<PolicyReport> {
        self.snapshot
            .book(book)?
            .ok_or(DomainError::MissingArgument { name: "book" })?;

        let tree = self.snapshot.domain_tree()?;
        let resolved = resolve_domains(&tree, domains)?;

        let mut report = PolicyReport::new();
        report.record(self.validator.validate_max_domains_per_book(&resolved))?;
        report.record(
            self.validator
                .validate_no_ancestor_domain_conflict(&tree, &resolved),
        )?;

        info!(permitted = report.is_permitted(), "Domain assignment evaluated");
        Ok(report)
    }

    /// Re-check the domains a book currently carries.
    pub fn evaluate_book(&self, book: BookId) -> LibrisResult<PolicyReport> {
        let current = self
            .snapshot
            .book(book)?
            .ok_or(DomainError::MissingArgument { name: "book" })?;
        self.evaluate_assignment(book, &current.domains)
    }
}

/// Look every id up in the arena, keeping order and duplicates.
fn resolve_domains(tree: &DomainTree, ids: &[DomainId]) -> Result<Vec<BookDomain>, DomainError> {
    ids.iter()
        .map(|&id| {
            tree.get(id)
                .cloned()
                .ok_or(DomainError::MissingArgument { name: "domains" })
        })
        .collect()
}
