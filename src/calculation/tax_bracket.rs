//! Progressive tax bracket resolution.
//!
//! The canonical internal representation is the sum-of-slices form: each
//! bracket taxes the slice of income it covers at its marginal rate. The
//! "amount × marginal rate − fixed deduction" shortcut published by some
//! jurisdictions is an equivalent derived view, exposed through
//! [`bracket_fixed_deduction`].
//!
//! Boundary convention: upper bounds are inclusive, so an amount exactly on
//! a boundary belongs to the lower bracket. The resolved tax is identical
//! either way (the function is continuous); the convention only fixes which
//! bracket [`marginal_bracket`] reports.

use rust_decimal::Decimal;

use crate::config::{TaxBracket, TaxTable};
use crate::error::{EngineError, EngineResult};

/// Resolves the progressive tax owed on a taxable amount.
///
/// Sums `(min(amount, upper) − lower) × rate` over every bracket the amount
/// reaches. An amount at or below zero resolves to zero tax. The result is
/// unrounded; callers round once at their final output figure.
///
/// # Arguments
///
/// * `taxable` - The taxable amount (monthly, per the table's convention)
/// * `table` - The jurisdiction's tax table
///
/// # Returns
///
/// Returns the tax owed, or [`EngineError::Configuration`] if the bracket
/// table is empty, gapped, or fails to cover the amount. A table defect
/// never silently resolves to zero tax.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::resolve_income_tax;
/// use payslip_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/kenya").unwrap();
/// let tax = resolve_income_tax(Decimal::from_str("45715").unwrap(), loader.config().tax()).unwrap();
/// // 24,000 × 10% + 8,333 × 25% + 13,382 × 30% = 8,497.85
/// assert_eq!(tax, Decimal::from_str("8497.85").unwrap());
/// ```
pub fn resolve_income_tax(taxable: Decimal, table: &TaxTable) -> EngineResult<Decimal> {
    let brackets = &table.brackets;

    if brackets.is_empty() {
        return Err(EngineError::Configuration {
            table: "tax.brackets".to_string(),
            message: "bracket table is empty".to_string(),
        });
    }

    let mut tax = Decimal::ZERO;
    let mut expected_lower = Decimal::ZERO;

    for bracket in brackets {
        if bracket.lower != expected_lower {
            return Err(EngineError::Configuration {
                table: "tax.brackets".to_string(),
                message: format!(
                    "gap or overlap at {}: expected lower bound {}",
                    bracket.lower, expected_lower
                ),
            });
        }

        if taxable > bracket.lower {
            let slice_top = match bracket.upper {
                Some(upper) => taxable.min(upper),
                None => taxable,
            };
            tax += (slice_top - bracket.lower) * bracket.rate;
        }

        match bracket.upper {
            Some(upper) => expected_lower = upper,
            None => return Ok(tax),
        }
    }

    // All brackets were bounded. The amount must fall inside the table.
    if taxable > expected_lower {
        return Err(EngineError::Configuration {
            table: "tax.brackets".to_string(),
            message: format!(
                "no bracket covers amount {}: table ends at {}",
                taxable, expected_lower
            ),
        });
    }

    Ok(tax)
}

/// Finds the bracket containing a taxable amount.
///
/// Amounts at or below the first lower bound resolve to the first bracket;
/// an amount exactly on a boundary belongs to the lower bracket (inclusive
/// upper bound).
pub fn marginal_bracket(taxable: Decimal, table: &TaxTable) -> EngineResult<&TaxBracket> {
    let brackets = &table.brackets;

    if brackets.is_empty() {
        return Err(EngineError::Configuration {
            table: "tax.brackets".to_string(),
            message: "bracket table is empty".to_string(),
        });
    }

    for bracket in brackets {
        match bracket.upper {
            Some(upper) if taxable <= upper => return Ok(bracket),
            Some(_) => continue,
            None => return Ok(bracket),
        }
    }

    Err(EngineError::Configuration {
        table: "tax.brackets".to_string(),
        message: format!("no bracket covers amount {}", taxable),
    })
}

/// The fixed deduction of the "rate minus deduction" shortcut form for one
/// bracket.
///
/// For any amount inside bracket `i`, `tax = amount × rate_i − deduction_i`.
/// The deduction is derived from the slice-sum form rather than stored, so
/// the two views cannot drift apart.
pub fn bracket_fixed_deduction(table: &TaxTable, bracket_index: usize) -> EngineResult<Decimal> {
    let bracket = table.brackets.get(bracket_index).ok_or_else(|| {
        EngineError::Configuration {
            table: "tax.brackets".to_string(),
            message: format!("bracket index {} out of range", bracket_index),
        }
    })?;

    let tax_at_lower = resolve_income_tax(bracket.lower, table)?;
    Ok(bracket.rate * bracket.lower - tax_at_lower)
}
