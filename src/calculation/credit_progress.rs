//! Repayment progress and delinquency assessment.
//!
//! Produces a [`CreditProgressSnapshot`] from a loan contract, the
//! authoritative amount repaid, and an explicit assessment date. The
//! assessment is a pure derivation: it never mutates the contract and never
//! records anything, so re-running it with the same inputs yields the same
//! snapshot.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::config::CreditRules;
use crate::models::{CreditProgressSnapshot, LoanContract, LoanStatus};

use super::round_money;

/// Assesses a loan's repayment progress at a point in time.
///
/// Expected repayment is `elapsed installments × monthly payment`, where an
/// installment counts as elapsed once its month anniversary of the start
/// date has passed. The loan is delinquent when less has been repaid than
/// expected with at least one period elapsed, and the months in arrears are
/// the whole payments behind.
///
/// Status resolution, in order:
/// 1. `PaidOff` when the repaid amount covers the principal
/// 2. `Suspended` when past the contractual end date without full
///    repayment, or in arrears beyond the configured threshold
/// 3. `Active` otherwise
///
/// A degenerate contract (non-positive principal or payment, zero term)
/// yields an all-zero `Active` snapshot rather than an error: assessment is
/// a read-side view and should not fail on data the write side already
/// rejected.
///
/// # Arguments
///
/// * `contract` - The loan contract under assessment
/// * `amount_repaid` - The authoritative total repaid; negatives clamp to zero
/// * `now` - The explicit assessment date
/// * `rules` - The jurisdiction's credit rules
pub fn assess_progress(
    contract: &LoanContract,
    amount_repaid: Decimal,
    now: NaiveDate,
    rules: &CreditRules,
) -> CreditProgressSnapshot {
    if contract.principal <= Decimal::ZERO
        || contract.term_months == 0
        || contract.monthly_payment <= Decimal::ZERO
    {
        return CreditProgressSnapshot {
            elapsed_installments: 0,
            expected_repaid: Decimal::ZERO,
            amount_repaid: Decimal::ZERO,
            remaining_balance: Decimal::ZERO,
            progress_percent: Decimal::ZERO,
            delinquent: false,
            months_in_arrears: 0,
            status: LoanStatus::Active,
        };
    }

    let repaid = amount_repaid.max(Decimal::ZERO);
    let elapsed = elapsed_installments(contract.start_date, now).min(contract.term_months);
    let expected_repaid = Decimal::from(elapsed) * contract.monthly_payment;
    let remaining_balance = (contract.principal - repaid).max(Decimal::ZERO);
    let progress_percent = round_money(
        (repaid / contract.principal * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED),
    );

    let delinquent = elapsed > 0 && repaid < expected_repaid;
    let months_in_arrears = if delinquent {
        let behind = (expected_repaid - repaid) / contract.monthly_payment;
        behind.floor().to_u32().unwrap_or(u32::MAX).min(elapsed)
    } else {
        0
    };

    let past_end_date = contract.end_date().is_some_and(|end| now > end);
    let status = if repaid >= contract.principal {
        LoanStatus::PaidOff
    } else if past_end_date || months_in_arrears > rules.delinquency_threshold_months {
        LoanStatus::Suspended
    } else {
        LoanStatus::Active
    };

    debug!(
        loan_id = %contract.id,
        elapsed,
        months_in_arrears,
        ?status,
        "assessed repayment progress"
    );

    CreditProgressSnapshot {
        elapsed_installments: elapsed,
        expected_repaid,
        amount_repaid: repaid,
        remaining_balance,
        progress_percent,
        delinquent,
        months_in_arrears,
        status,
    }
}

/// Whole installment periods elapsed between the start date and `now`.
///
/// A period counts as elapsed once its due date has passed, where due
/// dates follow the same month-anniversary arithmetic the schedule
/// generator uses: `start + i months` with a month-end start clamping to
/// the last day of shorter months. A January 31st loan therefore has its
/// first period elapse on February 28th, matching the generated schedule.
fn elapsed_installments(start: NaiveDate, now: NaiveDate) -> u32 {
    if now <= start {
        return 0;
    }
    let months = (now.year() - start.year()) * 12 + (now.month() as i32 - start.month() as i32);
    if months <= 0 {
        return 0;
    }
    let months = months as u32;
    match start.checked_add_months(Months::new(months)) {
        Some(due) if now >= due => months,
        _ => months - 1,
    }
}
