//! Calculation logic for the payroll and credit engine.
//!
//! This module contains all the pure computation functions: progressive tax
//! bracket resolution, statutory contribution calculation, seniority bonus
//! lookup, the payroll orchestrator, amortization schedule generation, and
//! repayment-progress assessment. Every function is deterministic given its
//! inputs; "now" is always an explicit parameter.

mod amortization;
mod credit_progress;
mod payroll;
mod seniority;
mod statutory;
mod tax_bracket;

pub use amortization::{generate_schedule, monthly_payment};
pub use credit_progress::assess_progress;
pub use payroll::calculate_payroll;
pub use seniority::{seniority_bonus, seniority_rate, years_of_service, SeniorityBonusResult};
pub use statutory::{calculate_employee_contributions, calculate_employer_contributions};
pub use tax_bracket::{bracket_fixed_deduction, marginal_bracket, resolve_income_tax};

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to 2 decimal places, half away from zero.
///
/// Applied once at each final output figure, never after intermediate
/// multiplications, so rounding drift does not compound.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
