use crate::domain::{DomainError, RuleViolation};

/// Outcome of evaluating several rules against one request.
///
/// Collects every rule violation instead of stopping at the first one.
/// Usage errors are not collected; they abort the evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyReport {
    violations: Vec<RuleViolation>,
}

impl PolicyReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one rule result into the report.
    ///
    /// Violations are kept; usage errors are handed back to the caller.
    pub fn record(&mut self, outcome: Result<(), DomainError>) -> Result<(), DomainError> {
        match outcome {
            Ok(()) => Ok(()),
            Err(DomainError::Violation(violation)) => {
                self.violations.push(violation);
                Ok(())
            }
            Err(usage) => Err(usage),
        }
    }

    pub fn push(&mut self, violation: RuleViolation) {
        self.violations.push(violation);
    }

    /// No rule objected.
    pub fn is_permitted(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[RuleViolation] {
        &self.violations
    }

    /// Names of the rules that objected, in evaluation order.
    pub fn rules(&self) -> Vec<&'static str> {
        self.violations.iter().map(RuleViolation::rule).collect()
    }

    /// Collapse to the first violation, matching short-circuit callers.
    pub fn into_result(self) -> Result<(), RuleViolation> {
        match self.violations.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        }
    }
}
