use tracing::{info, warn};

use crate::domain::{
    entities::{BookDomain, DomainTree},
    error::{DomainError, RuleViolation},
    settings::{RuleSettings, require_positive},
};

/// Catalog-taxonomy policy for book/domain assignments.
#[derive(Debug, Clone)]
pub struct DomainValidator {
    rules: RuleSettings,
}

impl DomainValidator {
    pub fn new(rules: RuleSettings) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSettings {
        &self.rules
    }

    /// Counts the list as given; duplicates are not collapsed.
    pub fn validate_max_domains_per_book(&self, domains: &[BookDomain]) -> Result<(), DomainError> {
        let max = require_positive("max_domains_per_book", self.rules.max_domains_per_book)?;
        let max = usize::try_from(max).unwrap_or(0);
        let count = domains.len();

        info!(count, max_allowed = max, "Validating max domains per book");

        if count > max {
            warn!(count, max_allowed = max, "Too many domains for book");
            return Err(RuleViolation::TooManyDomainsForBook { count, max }.into());
        }

        Ok(())
    }

    /// No domain may be assigned together with one of its ancestors.
    ///
    /// Parent chains are resolved through `tree`; the first ancestor found in
    /// `domains` is reported.
    pub fn validate_no_ancestor_domain_conflict(
        &self,
        tree: &DomainTree,
        domains: &[BookDomain],
    ) -> Result<(), DomainError> {
        for domain in domains {
            for ancestor in tree.ancestors(domain) {
                let ancestor = ancestor?;
                if domains.iter().any(|d| d.id == ancestor.id) {
                    warn!(
                        domain = %domain.name,
                        ancestor = %ancestor.name,
                        "Domain assigned together with its ancestor"
                    );
                    return Err(RuleViolation::DomainConflict {
                        domain: domain.name.clone(),
                        ancestor: ancestor.name.clone(),
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}
