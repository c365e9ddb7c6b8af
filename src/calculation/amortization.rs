//! Loan amortization schedule generation.
//!
//! Produces a constant-payment (annuity) schedule where each installment
//! splits into an interest portion on the outstanding balance and a
//! principal portion that retires it. Amounts are carried in rounded money
//! space so that the principal column sums back to the loan principal
//! exactly and the final balance lands on zero with no residual cents.

use chrono::Months;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::CreditRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AmortizationInstallment, LoanContract};

use super::round_money;

fn months_per_year() -> Decimal {
    Decimal::from(12u32)
}

/// Computes the constant monthly payment for an annuity loan.
///
/// Uses the standard annuity formula `P · r · (1+r)^n / ((1+r)^n − 1)`
/// with `r` the monthly rate. A zero-rate loan degrades to straight-line
/// repayment of `P / n`.
///
/// # Arguments
///
/// * `principal` - The amount borrowed
/// * `annual_rate` - The nominal annual interest rate as a fraction
/// * `term_months` - The number of monthly installments
///
/// # Returns
///
/// Returns the payment rounded to money precision, or
/// [`EngineError::InvalidInput`] for a non-positive principal, a negative
/// rate, or a zero term.
pub fn monthly_payment(
    principal: Decimal,
    annual_rate: Decimal,
    term_months: u32,
) -> EngineResult<Decimal> {
    if principal <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "principal".to_string(),
            message: format!("must be positive, got {}", principal),
        });
    }
    if annual_rate < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "annual_rate".to_string(),
            message: format!("must not be negative, got {}", annual_rate),
        });
    }
    if term_months == 0 {
        return Err(EngineError::InvalidInput {
            field: "term_months".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    let monthly_rate = annual_rate / months_per_year();
    if monthly_rate.is_zero() {
        return Ok(round_money(principal / Decimal::from(term_months)));
    }

    let growth =
        compound_factor(monthly_rate, term_months).ok_or_else(|| EngineError::InvalidInput {
            field: "annual_rate".to_string(),
            message: format!(
                "rate {} compounded over {} months overflows the money representation",
                annual_rate, term_months
            ),
        })?;
    let payment = principal * monthly_rate * growth / (growth - Decimal::ONE);
    Ok(round_money(payment))
}

/// Generates the full installment schedule for a loan contract.
///
/// Each row carries the interest on the running balance, the principal
/// retired, any interest tax and flat insurance charge, and the balance
/// after the installment. Interest tax applies `rules.interest_tax_rate`
/// to each interest portion; insurance is a flat monthly charge of the
/// contract's `insurance_rate` on the original principal. Due dates fall
/// on successive month anniversaries of the start date; chrono clamps a
/// 31st to the shorter month's last day.
///
/// The last installment absorbs the rounding residual so the schedule
/// closes on a zero balance.
///
/// # Arguments
///
/// * `contract` - The loan contract to schedule
/// * `rules` - The jurisdiction's credit rules
///
/// # Returns
///
/// Returns one [`AmortizationInstallment`] per month of the term, or:
/// - [`EngineError::InvalidInput`] for a non-positive principal, negative
///   rate, or a term of zero or beyond `rules.max_term_months`
/// - [`EngineError::DegenerateLoan`] when the contract's payment cannot
///   cover the first month's interest, so the balance would never shrink
pub fn generate_schedule(
    contract: &LoanContract,
    rules: &CreditRules,
) -> EngineResult<Vec<AmortizationInstallment>> {
    if contract.principal <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "principal".to_string(),
            message: format!("must be positive, got {}", contract.principal),
        });
    }
    if contract.annual_rate < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "annual_rate".to_string(),
            message: format!("must not be negative, got {}", contract.annual_rate),
        });
    }
    if contract.term_months == 0 || contract.term_months > rules.max_term_months {
        return Err(EngineError::InvalidInput {
            field: "term_months".to_string(),
            message: format!(
                "must be between 1 and {}, got {}",
                rules.max_term_months, contract.term_months
            ),
        });
    }
    if let Some(insurance_rate) = contract.insurance_rate {
        if insurance_rate < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "insurance_rate".to_string(),
                message: format!("must not be negative, got {}", insurance_rate),
            });
        }
    }

    let monthly_rate = contract.annual_rate / months_per_year();
    let payment = contract.monthly_payment;
    let first_interest = round_money(round_money(contract.principal) * monthly_rate);
    if payment <= Decimal::ZERO || payment <= first_interest {
        return Err(EngineError::DegenerateLoan {
            message: format!(
                "payment {} never amortizes a {} balance accruing {} interest per month",
                payment, contract.principal, first_interest
            ),
        });
    }

    let insurance = contract
        .insurance_rate
        .map(|rate| round_money(contract.principal * rate))
        .unwrap_or(Decimal::ZERO);

    debug!(
        loan_id = %contract.id,
        %payment,
        term_months = contract.term_months,
        "generating amortization schedule"
    );

    let mut schedule = Vec::with_capacity(contract.term_months as usize);
    let mut balance = round_money(contract.principal);

    for number in 1..=contract.term_months {
        let due_date = contract
            .start_date
            .checked_add_months(Months::new(number))
            .ok_or_else(|| EngineError::InvalidInput {
                field: "start_date".to_string(),
                message: format!("due date overflows {} months past {}", number, contract.start_date),
            })?;

        let interest = round_money(balance * monthly_rate);
        let mut principal_portion = payment - interest;
        // The final row, or an early payoff, retires whatever is left.
        if number == contract.term_months || principal_portion >= balance {
            principal_portion = balance;
        }
        balance -= principal_portion;

        let interest_tax = round_money(interest * rules.interest_tax_rate);
        schedule.push(AmortizationInstallment {
            number,
            due_date,
            principal: principal_portion,
            interest,
            interest_tax,
            insurance,
            total_payment: principal_portion + interest + interest_tax + insurance,
            remaining_principal: balance,
        });
    }

    Ok(schedule)
}

/// `(1 + rate)^exponent` by repeated multiplication.
///
/// Terms are bounded by the configured maximum (at most 600 months), so
/// the loop stays cheap and avoids pulling in a power function. Returns
/// `None` when an extreme rate compounds past `Decimal`'s range; callers
/// surface that as an input error rather than a panic.
fn compound_factor(rate: Decimal, exponent: u32) -> Option<Decimal> {
    let base = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    for _ in 0..exponent {
        factor = factor.checked_mul(base)?;
    }
    Some(factor)
}
