//! Borrowing policy.
//!
//! Every check reads the [`RuleSettings`] the validator was built with plus
//! the snapshot handed in by the caller. Checks never mutate their inputs and
//! never look anything up on their own.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::domain::{
    entities::{Book, BookItem, Loan, LoanExtension, Reader},
    error::{DomainError, RuleViolation},
    settings::{RuleSettings, require_positive},
    validation::staff::{StaffRelaxation, effective_for_reader},
    value_objects::{BookItemId, DomainId},
};

/// Loans with at least this many items must span several domains.
const DIVERSITY_MIN_ITEMS: usize = 3;
const DIVERSITY_MIN_DOMAINS: usize = 2;

/// Share of the total stock (in tenths) that must stay on the shelf.
const RESERVE_TENTHS: usize = 1;

/// Enforces item-count limits, daily and periodic caps, domain diversity,
/// reborrow cooldown, availability reservation and extension caps.
#[derive(Debug, Clone)]
pub struct LoanValidator {
    rules: RuleSettings,
}

impl LoanValidator {
    pub fn new(rules: RuleSettings) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSettings {
        &self.rules
    }

    /// A single loan may hold at most `max_items_per_loan` copies.
    pub fn validate_loan_item_limit(&self, items: &[Arc<BookItem>]) -> Result<(), DomainError> {
        let max = as_count(require_positive(
            "max_items_per_loan",
            self.rules.max_items_per_loan,
        )?);
        info!(max_allowed = max, "Validating loan item limit");

        let count = items.len();
        if count > max {
            warn!(count, max_allowed = max, "Loan item limit exceeded");
            return Err(RuleViolation::LoanItemLimitExceeded { count, max }.into());
        }

        Ok(())
    }

    /// Items borrowed on the loan's calendar day, including this loan, may
    /// not exceed `max_items_per_day`. Staff are exempt.
    pub fn validate_daily_loan_limit(
        &self,
        reader: &Reader,
        loan_date: NaiveDateTime,
        existing_loans: &[Loan],
        new_items: &[Arc<BookItem>],
    ) -> Result<(), DomainError> {
        let day = loan_date.date();
        info!(reader = %reader.id, %day, "Validating daily loan limit");

        let max = as_count(require_positive(
            "max_items_per_day",
            self.rules.max_items_per_day,
        )?);

        if reader.is_staff {
            info!(reader = %reader.id, "Reader is staff, daily loan limit ignored");
            return Ok(());
        }

        let already_borrowed = items_borrowed(existing_loans, reader, |d| d == day);
        let attempted = already_borrowed + new_items.len();

        if attempted > max {
            warn!(reader = %reader.id, attempted, limit = max, "Daily loan limit exceeded");
            return Err(RuleViolation::DailyLoanLimitExceeded { attempted, max }.into());
        }

        Ok(())
    }

    /// Three or more items must come from at least two distinct domains.
    ///
    /// Items whose book has no domain contribute nothing, which pushes the
    /// loan towards failing.
    pub fn validate_distinct_domains_for_loan(
        &self,
        items: &[Arc<BookItem>],
    ) -> Result<(), DomainError> {
        if items.len() < DIVERSITY_MIN_ITEMS {
            return Ok(());
        }

        let distinct: HashSet<DomainId> = items
            .iter()
            .flat_map(|item| item.book().domains.iter().copied())
            .collect();

        debug!(items = items.len(), distinct_domains = distinct.len(), "Domain diversity computed");

        if distinct.len() < DIVERSITY_MIN_DOMAINS {
            warn!(items = items.len(), distinct_domains = distinct.len(), "Insufficient domain diversity");
            return Err(RuleViolation::InsufficientDomainDiversity {
                items: items.len(),
                distinct_domains: distinct.len(),
            }
            .into());
        }

        Ok(())
    }

    /// At least 10% of the total stock (rounded up) must remain available
    /// after excluding reading-room copies and copies already on loan.
    ///
    /// Reading-room copies still count towards the total the reserve is
    /// computed from.
    pub fn validate_book_availability_for_loan(
        &self,
        book: &Book,
        all_items_for_book: &[Arc<BookItem>],
        currently_loaned_items: &[Arc<BookItem>],
    ) -> Result<(), DomainError> {
        info!(book = %book.id, "Validating availability");

        let total = all_items_for_book.len();
        if total == 0 {
            warn!(book = %book.id, "No physical copies exist");
            return Err(RuleViolation::NoCopiesExist { book: book.id }.into());
        }

        let loanable: HashSet<BookItemId> = all_items_for_book
            .iter()
            .filter(|item| item.is_loanable())
            .map(|item| item.id)
            .collect();

        if loanable.is_empty() {
            warn!(book = %book.id, "All copies are reading-room-only");
            return Err(RuleViolation::AllCopiesRestricted { book: book.id }.into());
        }

        let loaned: HashSet<BookItemId> = currently_loaned_items.iter().map(|i| i.id).collect();
        let available = loanable.difference(&loaned).count();
        let required = (total * RESERVE_TENTHS).div_ceil(10);

        if available < required {
            warn!(book = %book.id, available, required, "Not enough available copies");
            return Err(RuleViolation::InsufficientAvailability {
                book: book.id,
                available,
                required,
            }
            .into());
        }

        Ok(())
    }

    /// The same reader may not borrow the same book again until the cooldown
    /// has passed since their latest loan of it. Staff cooldown is halved.
    pub fn validate_book_reborrow_delta(
        &self,
        reader: &Reader,
        book: &Book,
        loan_date: NaiveDateTime,
        previous_loans: &[Loan],
    ) -> Result<(), DomainError> {
        info!(reader = %reader.id, book = %book.id, "Validating reborrow delta");

        let base = require_positive("reborrow_delta_days", self.rules.reborrow_delta_days)?;
        let cooldown_days = i64::from(effective_for_reader(
            base,
            reader.is_staff,
            StaffRelaxation::Halve,
        ));

        let last_loan = previous_loans
            .iter()
            .filter(|loan| loan.belongs_to(reader.id) && loan.contains_book(book.id))
            .map(|loan| loan.loan_date)
            .max();

        let Some(last_loan) = last_loan else {
            debug!(reader = %reader.id, book = %book.id, "No previous loan of this book");
            return Ok(());
        };

        let days_since = (loan_date.date() - last_loan.date()).num_days();

        if days_since < cooldown_days {
            warn!(
                reader = %reader.id,
                book = %book.id,
                days_since,
                cooldown_days,
                "Reborrow delta violated"
            );
            return Err(RuleViolation::ReborrowTooSoon {
                book: book.id,
                days_since,
                cooldown_days,
            }
            .into());
        }

        Ok(())
    }

    /// A loan may be extended at most `max_loan_extensions` times (doubled
    /// for staff). Reaching the limit already blocks the next extension.
    pub fn validate_loan_extension_limit(
        &self,
        loan: &Loan,
        existing_extensions: &[LoanExtension],
    ) -> Result<(), DomainError> {
        let base = require_positive("max_loan_extensions", self.rules.max_loan_extensions)?;
        let max = as_count(effective_for_reader(
            base,
            loan.reader.is_staff,
            StaffRelaxation::Double,
        ));

        let count = existing_extensions
            .iter()
            .filter(|ext| ext.loan_id == loan.id)
            .count();

        debug!(loan = %loan.id, count, limit = max, "Validating loan extension limit");

        if count >= max {
            warn!(loan = %loan.id, count, limit = max, "Loan extension limit reached");
            return Err(RuleViolation::ExtensionLimitExceeded {
                loan: loan.id,
                count,
                max,
            }
            .into());
        }

        Ok(())
    }

    /// Items borrowed in `[loan day - period, loan day]`, including this
    /// loan, may not exceed the period cap. Staff get half the window and
    /// twice the cap.
    pub fn validate_max_items_in_period(
        &self,
        reader: &Reader,
        loan_date: NaiveDateTime,
        existing_loans: &[Loan],
        new_items: &[Arc<BookItem>],
    ) -> Result<(), DomainError> {
        let period = require_positive("period_days", self.rules.period_days)?;
        let cap = require_positive("max_items_in_period", self.rules.max_items_in_period)?;

        let period_days = i64::from(effective_for_reader(
            period,
            reader.is_staff,
            StaffRelaxation::Halve,
        ));
        let max = as_count(effective_for_reader(cap, reader.is_staff, StaffRelaxation::Double));

        let to = loan_date.date();
        let from = to
            .checked_sub_signed(Duration::days(period_days))
            .unwrap_or(NaiveDate::MIN);

        info!(reader = %reader.id, %from, %to, limit = max, "Validating max items in period");

        let already_borrowed = items_borrowed(existing_loans, reader, |d| from <= d && d <= to);
        let attempted = already_borrowed + new_items.len();

        if attempted > max {
            warn!(reader = %reader.id, attempted, limit = max, period_days, "Period limit exceeded");
            return Err(RuleViolation::PeriodLimitExceeded {
                attempted,
                max,
                period_days,
            }
            .into());
        }

        Ok(())
    }
}

/// Sum of loan items over the reader's loans whose day matches `in_window`.
fn items_borrowed(
    loans: &[Loan],
    reader: &Reader,
    in_window: impl Fn(NaiveDate) -> bool,
) -> usize {
    loans
        .iter()
        .filter(|loan| loan.belongs_to(reader.id) && in_window(loan.loan_day()))
        .map(Loan::item_count)
        .sum()
}

/// Settings are checked positive before they reach here.
fn as_count(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::BookId;
    use crate::test_support::*;

    fn validator() -> LoanValidator {
        LoanValidator::new(RuleSettings::default())
    }

    fn with(rules: RuleSettings) -> LoanValidator {
        LoanValidator::new(rules)
    }

    fn violation(result: Result<(), DomainError>) -> RuleViolation {
        match result {
            Err(DomainError::Violation(v)) => v,
            other => panic!("expected a rule violation, got {other:?}"),
        }
    }

    // ========================================================================
    // Loan item limit
    // ========================================================================

    #[test]
    fn item_limit_allows_up_to_maximum() {
        let b = book(1, &[1]);
        let v = with(RuleSettings {
            max_items_per_loan: 3,
            ..RuleSettings::default()
        });

        for n in 0..=3 {
            assert!(v.validate_loan_item_limit(&copies(&b, 1, n)).is_ok(), "n = {n}");
        }
    }

    #[test]
    fn item_limit_rejects_one_over() {
        let b = book(1, &[1]);
        let v = with(RuleSettings {
            max_items_per_loan: 3,
            ..RuleSettings::default()
        });

        assert_eq!(
            violation(v.validate_loan_item_limit(&copies(&b, 1, 4))),
            RuleViolation::LoanItemLimitExceeded { count: 4, max: 3 }
        );
    }

    #[test]
    fn item_limit_rejects_non_positive_setting() {
        let v = with(RuleSettings {
            max_items_per_loan: 0,
            ..RuleSettings::default()
        });

        assert_eq!(
            v.validate_loan_item_limit(&[]),
            Err(DomainError::InvalidSetting {
                setting: "max_items_per_loan",
                value: 0
            })
        );
    }

    // ========================================================================
    // Daily limit
    // ========================================================================

    #[test]
    fn daily_limit_counts_same_day_loans_only() {
        let r = reader(1);
        let b = book(1, &[1]);
        let today = day(2025, 5, 10);
        let history = vec![
            loan(1, &r, today, &copies(&b, 1, 3)),
            loan(2, &r, day(2025, 5, 9), &copies(&b, 10, 5)),
        ];
        let v = with(RuleSettings {
            max_items_per_day: 5,
            ..RuleSettings::default()
        });

        assert!(v.validate_daily_loan_limit(&r, today, &history, &copies(&b, 20, 2)).is_ok());
        assert_eq!(
            violation(v.validate_daily_loan_limit(&r, today, &history, &copies(&b, 20, 3))),
            RuleViolation::DailyLoanLimitExceeded {
                attempted: 6,
                max: 5
            }
        );
    }

    #[test]
    fn daily_limit_ignores_time_of_day() {
        let r = reader(1);
        let b = book(1, &[1]);
        let morning = day(2025, 5, 10);
        let evening = morning + Duration::hours(9);
        let history = vec![loan(1, &r, morning, &copies(&b, 1, 5))];

        assert!(
            validator()
                .validate_daily_loan_limit(&r, evening, &history, &copies(&b, 9, 1))
                .is_err()
        );
    }

    #[test]
    fn daily_limit_ignores_other_readers() {
        let r = reader(1);
        let other = reader(2);
        let b = book(1, &[1]);
        let today = day(2025, 5, 10);
        let history = vec![loan(1, &other, today, &copies(&b, 1, 5))];

        assert!(
            validator()
                .validate_daily_loan_limit(&r, today, &history, &copies(&b, 9, 5))
                .is_ok()
        );
    }

    #[test]
    fn daily_limit_exempts_staff() {
        let s = staff(1);
        let b = book(1, &[1]);
        let today = day(2025, 5, 10);
        let history = vec![loan(1, &s, today, &copies(&b, 1, 5))];

        assert!(
            validator()
                .validate_daily_loan_limit(&s, today, &history, &copies(&b, 9, 5))
                .is_ok()
        );
    }

    #[test]
    fn daily_limit_checks_setting_before_staff_exemption() {
        let v = with(RuleSettings {
            max_items_per_day: -1,
            ..RuleSettings::default()
        });

        assert!(matches!(
            v.validate_daily_loan_limit(&staff(1), day(2025, 5, 10), &[], &[]),
            Err(DomainError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn daily_limit_handles_extreme_dates() {
        let r = reader(1);
        assert!(validator().validate_daily_loan_limit(&r, NaiveDateTime::MIN, &[], &[]).is_ok());
        assert!(validator().validate_daily_loan_limit(&r, NaiveDateTime::MAX, &[], &[]).is_ok());
    }

    // ========================================================================
    // Domain diversity
    // ========================================================================

    #[test]
    fn diversity_rejects_three_items_from_one_domain() {
        let b = book(1, &[7]);
        assert_eq!(
            violation(validator().validate_distinct_domains_for_loan(&copies(&b, 1, 3))),
            RuleViolation::InsufficientDomainDiversity {
                items: 3,
                distinct_domains: 1
            }
        );
    }

    #[test]
    fn diversity_accepts_two_domains_across_three_items() {
        let physics = book(1, &[1]);
        let art = book(2, &[2]);
        let items = vec![copy(1, &physics), copy(2, &physics), copy(3, &art)];

        assert!(validator().validate_distinct_domains_for_loan(&items).is_ok());
    }

    #[test]
    fn diversity_skips_loans_under_three_items() {
        let untagged = book(1, &[]);
        assert!(validator().validate_distinct_domains_for_loan(&copies(&untagged, 1, 2)).is_ok());
        assert!(validator().validate_distinct_domains_for_loan(&[]).is_ok());
    }

    #[test]
    fn diversity_counts_books_without_domains_as_nothing() {
        let tagged = book(1, &[1]);
        let untagged = book(2, &[]);
        let items = vec![copy(1, &tagged), copy(2, &untagged), copy(3, &untagged)];

        assert!(validator().validate_distinct_domains_for_loan(&items).is_err());
    }

    #[test]
    fn diversity_accepts_single_book_with_two_domains() {
        let b = book(1, &[1, 2]);
        assert!(validator().validate_distinct_domains_for_loan(&copies(&b, 1, 3)).is_ok());
    }

    // ========================================================================
    // Availability
    // ========================================================================

    #[test]
    fn availability_accepts_eight_of_ten_loaned() {
        let b = book(1, &[1]);
        let stock = copies(&b, 1, 10);

        assert!(
            validator()
                .validate_book_availability_for_loan(&b, &stock, &stock[..8])
                .is_ok()
        );
    }

    #[test]
    fn availability_accepts_exactly_ten_percent_remaining() {
        let b = book(1, &[1]);
        let stock = copies(&b, 1, 10);

        assert!(
            validator()
                .validate_book_availability_for_loan(&b, &stock, &stock[..9])
                .is_ok()
        );
    }

    #[test]
    fn availability_rejects_fully_loaned_stock() {
        let b = book(1, &[1]);
        let stock = copies(&b, 1, 10);

        assert_eq!(
            violation(validator().validate_book_availability_for_loan(&b, &stock, &stock)),
            RuleViolation::InsufficientAvailability {
                book: b.id,
                available: 0,
                required: 1
            }
        );
    }

    #[test]
    fn availability_requires_some_copies() {
        let b = book(1, &[1]);
        assert_eq!(
            violation(validator().validate_book_availability_for_loan(&b, &[], &[])),
            RuleViolation::NoCopiesExist { book: b.id }
        );
    }

    #[test]
    fn availability_rejects_reading_room_only_stock() {
        let b = book(1, &[1]);
        let stock = vec![restricted_copy(1, &b), restricted_copy(2, &b)];

        assert_eq!(
            violation(validator().validate_book_availability_for_loan(&b, &stock, &[])),
            RuleViolation::AllCopiesRestricted { book: b.id }
        );
    }

    #[test]
    fn availability_reserve_counts_reading_room_copies() {
        // 11 copies in total -> 2 must stay available; only 2 circulate.
        let b = book(1, &[1]);
        let mut stock: Vec<_> = (1..=9).map(|id| restricted_copy(id, &b)).collect();
        stock.extend(copies(&b, 10, 2));

        assert!(
            validator()
                .validate_book_availability_for_loan(&b, &stock, &[])
                .is_ok()
        );
        assert!(
            validator()
                .validate_book_availability_for_loan(&b, &stock, &stock[9..10])
                .is_err()
        );
    }

    #[test]
    fn availability_matches_loaned_copies_by_id() {
        let b = book(1, &[1]);
        let stock = copies(&b, 1, 1);
        // Separate allocation, same copy id.
        let loaned = vec![copy(1, &b)];

        assert!(
            validator()
                .validate_book_availability_for_loan(&b, &stock, &loaned)
                .is_err()
        );
    }

    // ========================================================================
    // Reborrow delta
    // ========================================================================

    fn reborrow(rules_days: i32, reader: &Arc<Reader>, days_ago: i64) -> Result<(), DomainError> {
        let b = book(1, &[1]);
        let today = day(2025, 6, 20);
        let history = vec![loan(1, reader, today - Duration::days(days_ago), &copies(&b, 1, 1))];

        with(RuleSettings {
            reborrow_delta_days: rules_days,
            ..RuleSettings::default()
        })
        .validate_book_reborrow_delta(reader, &b, today, &history)
    }

    #[test]
    fn reborrow_rejects_loan_within_cooldown() {
        assert_eq!(
            violation(reborrow(10, &reader(1), 5)),
            RuleViolation::ReborrowTooSoon {
                book: BookId::new(1),
                days_since: 5,
                cooldown_days: 10
            }
        );
    }

    #[test]
    fn reborrow_accepts_loan_after_cooldown() {
        assert!(reborrow(10, &reader(1), 15).is_ok());
        assert!(reborrow(10, &reader(1), 10).is_ok());
    }

    #[test]
    fn reborrow_halves_cooldown_for_staff() {
        assert!(reborrow(10, &staff(1), 5).is_ok());
        assert!(reborrow(10, &staff(1), 4).is_err());
    }

    #[test]
    fn reborrow_accepts_book_never_borrowed() {
        let r = reader(1);
        let wanted = book(1, &[1]);
        let other = book(2, &[1]);
        let today = day(2025, 6, 20);
        let history = vec![loan(1, &r, today, &copies(&other, 1, 1))];

        assert!(
            validator()
                .validate_book_reborrow_delta(&r, &wanted, today, &history)
                .is_ok()
        );
    }

    #[test]
    fn reborrow_uses_most_recent_loan() {
        let r = reader(1);
        let b = book(1, &[1]);
        let today = day(2025, 6, 20);
        let history = vec![
            loan(1, &r, today - Duration::days(40), &copies(&b, 1, 1)),
            loan(2, &r, today - Duration::days(3), &copies(&b, 2, 1)),
        ];

        assert!(
            validator()
                .validate_book_reborrow_delta(&r, &b, today, &history)
                .is_err()
        );
    }

    #[test]
    fn reborrow_ignores_other_readers_history() {
        let b = book(1, &[1]);
        let today = day(2025, 6, 20);
        let history = vec![loan(1, &reader(2), today, &copies(&b, 1, 1))];

        assert!(
            validator()
                .validate_book_reborrow_delta(&reader(1), &b, today, &history)
                .is_ok()
        );
    }

    #[test]
    fn reborrow_rejects_non_positive_setting() {
        assert!(matches!(
            reborrow(0, &reader(1), 100),
            Err(DomainError::InvalidSetting {
                setting: "reborrow_delta_days",
                ..
            })
        ));
    }

    // ========================================================================
    // Extension limit
    // ========================================================================

    fn extensions(loan_id: u32, count: u32) -> Vec<LoanExtension> {
        (1..=count)
            .map(|id| LoanExtension::new(id, loan_id, 7, day(2025, 7, id)))
            .collect()
    }

    #[test]
    fn extension_limit_rejects_at_maximum() {
        let l = loan(1, &reader(1), day(2025, 7, 1), &[]);
        let v = with(RuleSettings {
            max_loan_extensions: 2,
            ..RuleSettings::default()
        });

        assert!(v.validate_loan_extension_limit(&l, &extensions(1, 1)).is_ok());
        assert_eq!(
            violation(v.validate_loan_extension_limit(&l, &extensions(1, 2))),
            RuleViolation::ExtensionLimitExceeded {
                loan: l.id,
                count: 2,
                max: 2
            }
        );
    }

    #[test]
    fn extension_limit_ignores_other_loans() {
        let l = loan(1, &reader(1), day(2025, 7, 1), &[]);
        assert!(
            validator()
                .validate_loan_extension_limit(&l, &extensions(2, 10))
                .is_ok()
        );
    }

    #[test]
    fn extension_limit_doubles_for_staff() {
        let l = loan(1, &staff(1), day(2025, 7, 1), &[]);
        let v = with(RuleSettings {
            max_loan_extensions: 2,
            ..RuleSettings::default()
        });

        assert!(v.validate_loan_extension_limit(&l, &extensions(1, 3)).is_ok());
        assert!(v.validate_loan_extension_limit(&l, &extensions(1, 4)).is_err());
    }

    #[test]
    fn extension_limit_message_states_the_staff_limit() {
        let l = loan(1, &staff(1), day(2025, 7, 1), &[]);
        let v = with(RuleSettings {
            max_loan_extensions: 2,
            ..RuleSettings::default()
        });

        let err = v
            .validate_loan_extension_limit(&l, &extensions(1, 4))
            .unwrap_err();
        assert_eq!(err.to_string(), "Loan cannot be extended more than 4 times.");
    }

    #[test]
    fn extension_limit_rejects_non_positive_setting() {
        for value in [0, -2] {
            let v = with(RuleSettings {
                max_loan_extensions: value,
                ..RuleSettings::default()
            });

            // Staff doubling never rescues a broken setting.
            for owner in [reader(1), staff(2)] {
                let l = loan(1, &owner, day(2025, 7, 1), &[]);
                assert_eq!(
                    v.validate_loan_extension_limit(&l, &[]),
                    Err(DomainError::InvalidSetting {
                        setting: "max_loan_extensions",
                        value
                    })
                );
            }
        }
    }

    // ========================================================================
    // Period limit
    // ========================================================================

    fn period_rules() -> RuleSettings {
        RuleSettings {
            period_days: 10,
            max_items_in_period: 4,
            ..RuleSettings::default()
        }
    }

    #[test]
    fn period_window_is_inclusive_on_both_ends() {
        let r = reader(1);
        let b = book(1, &[1]);
        let today = day(2025, 8, 20);
        let history = vec![
            loan(1, &r, today - Duration::days(10), &copies(&b, 1, 2)),
            loan(2, &r, today, &copies(&b, 3, 2)),
        ];

        assert_eq!(
            violation(with(period_rules()).validate_max_items_in_period(
                &r,
                today,
                &history,
                &copies(&b, 9, 1)
            )),
            RuleViolation::PeriodLimitExceeded {
                attempted: 5,
                max: 4,
                period_days: 10
            }
        );
    }

    #[test]
    fn period_window_excludes_older_loans() {
        let r = reader(1);
        let b = book(1, &[1]);
        let today = day(2025, 8, 20);
        let history = vec![loan(1, &r, today - Duration::days(11), &copies(&b, 1, 4))];

        assert!(
            with(period_rules())
                .validate_max_items_in_period(&r, today, &history, &copies(&b, 9, 4))
                .is_ok()
        );
    }

    #[test]
    fn period_limit_is_looser_for_staff() {
        let b = book(1, &[1]);
        let today = day(2025, 8, 20);
        let v = with(period_rules());

        // Same history: 3 items six days ago, asking for 3 more.
        let r = reader(1);
        let s = staff(2);
        let reader_history = vec![loan(1, &r, today - Duration::days(6), &copies(&b, 1, 3))];
        let staff_history = vec![loan(2, &s, today - Duration::days(6), &copies(&b, 1, 3))];
        let wanted = copies(&b, 9, 3);

        assert!(v.validate_max_items_in_period(&r, today, &reader_history, &wanted).is_err());
        // Staff window is 5 days (loan falls outside) and cap is 8.
        assert!(v.validate_max_items_in_period(&s, today, &staff_history, &wanted).is_ok());
        assert!(
            v.validate_max_items_in_period(&s, today, &staff_history, &copies(&b, 9, 8))
                .is_ok()
        );
        assert!(
            v.validate_max_items_in_period(&s, today, &staff_history, &copies(&b, 9, 9))
                .is_err()
        );
    }

    #[test]
    fn period_limit_rejects_non_positive_settings() {
        let r = reader(1);
        let zero_period = with(RuleSettings {
            period_days: 0,
            ..RuleSettings::default()
        });
        let zero_cap = with(RuleSettings {
            max_items_in_period: 0,
            ..RuleSettings::default()
        });

        assert!(matches!(
            zero_period.validate_max_items_in_period(&r, day(2025, 1, 1), &[], &[]),
            Err(DomainError::InvalidSetting {
                setting: "period_days",
                ..
            })
        ));
        assert!(matches!(
            zero_cap.validate_max_items_in_period(&r, day(2025, 1, 1), &[], &[]),
            Err(DomainError::InvalidSetting {
                setting: "max_items_in_period",
                ..
            })
        ));
    }

    #[test]
    fn period_limit_handles_earliest_date() {
        assert!(
            validator()
                .validate_max_items_in_period(&reader(1), NaiveDateTime::MIN, &[], &[])
                .is_ok()
        );
    }
}
