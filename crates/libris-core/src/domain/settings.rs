//! The rulebook: configurable limits consumed by the validators.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Lending limits for one library.
///
/// Values are signed so that a misconfigured rulebook (zero or negative) can
/// be represented and reported as [`DomainError::InvalidSetting`] by the rule
/// that reads it, instead of being silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub max_items_per_loan: i32,
    pub max_items_per_day: i32,
    pub reborrow_delta_days: i32,
    pub max_loan_extensions: i32,
    pub period_days: i32,
    pub max_items_in_period: i32,
    pub max_domains_per_book: i32,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            max_items_per_loan: 5,
            max_items_per_day: 5,
            reborrow_delta_days: 14,
            max_loan_extensions: 2,
            period_days: 30,
            max_items_in_period: 10,
            max_domains_per_book: 3,
        }
    }
}

impl RuleSettings {
    /// Every setting with its field name, in declaration order.
    pub fn entries(&self) -> [(&'static str, i32); 7] {
        [
            ("max_items_per_loan", self.max_items_per_loan),
            ("max_items_per_day", self.max_items_per_day),
            ("reborrow_delta_days", self.reborrow_delta_days),
            ("max_loan_extensions", self.max_loan_extensions),
            ("period_days", self.period_days),
            ("max_items_in_period", self.max_items_in_period),
            ("max_domains_per_book", self.max_domains_per_book),
        ]
    }

    /// Check all seven settings at once; reports the first non-positive one.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (setting, value) in self.entries() {
            require_positive(setting, value)?;
        }
        Ok(())
    }
}

/// Read a setting as a count, rejecting zero and negatives.
pub(crate) fn require_positive(setting: &'static str, value: i32) -> Result<i32, DomainError> {
    if value <= 0 {
        return Err(DomainError::InvalidSetting { setting, value });
    }
    Ok(value)
}
