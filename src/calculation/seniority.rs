//! Seniority bonus calculation.
//!
//! Maps whole years of service to a bonus rate through the jurisdiction's
//! band scale and applies it to base salary. A years value no band covers
//! is a configuration defect and fails loudly, never a silent zero.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::SeniorityBand;
use crate::error::{EngineError, EngineResult};

use super::round_money;

/// The result of a seniority bonus calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeniorityBonusResult {
    /// Whole years of service at the assessment date.
    pub years_of_service: u32,
    /// The band rate resolved for those years.
    pub rate: Decimal,
    /// The bonus: base salary × rate, rounded to 2 decimal places.
    pub amount: Decimal,
}

/// Whole years of service between a hire date and an assessment date.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when the hire date is after the
/// assessment date.
pub fn years_of_service(hire_date: NaiveDate, as_of: NaiveDate) -> EngineResult<u32> {
    as_of
        .years_since(hire_date)
        .ok_or_else(|| EngineError::InvalidInput {
            field: "hire_date".to_string(),
            message: format!("{} is after the assessment date {}", hire_date, as_of),
        })
}

/// Resolves the bonus rate for a number of whole years of service.
///
/// # Errors
///
/// Returns [`EngineError::Configuration`] when no band covers the years
/// value — an incomplete scale must fail rather than default to zero.
pub fn seniority_rate(years: u32, bands: &[SeniorityBand]) -> EngineResult<Decimal> {
    bands
        .iter()
        .find(|band| {
            years >= band.min_years
                && band.max_years.map_or(true, |max_years| years <= max_years)
        })
        .map(|band| band.rate)
        .ok_or_else(|| EngineError::Configuration {
            table: "payroll.seniority_bands".to_string(),
            message: format!("no band covers {} years of service", years),
        })
}

/// Computes the seniority bonus for an employee.
///
/// # Arguments
///
/// * `base_salary` - The monthly base salary the rate applies to
/// * `hire_date` - The employee's hire date
/// * `as_of` - The explicit assessment date ("now")
/// * `bands` - The jurisdiction's seniority band scale
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::seniority_bonus;
/// use payslip_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/morocco").unwrap();
/// let result = seniority_bonus(
///     Decimal::from_str("10000").unwrap(),
///     NaiveDate::from_ymd_opt(2018, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
///     &loader.config().payroll_rules().seniority_bands,
/// ).unwrap();
/// // 7 years of service falls in the 10% band.
/// assert_eq!(result.amount, Decimal::from_str("1000.00").unwrap());
/// ```
pub fn seniority_bonus(
    base_salary: Decimal,
    hire_date: NaiveDate,
    as_of: NaiveDate,
    bands: &[SeniorityBand],
) -> EngineResult<SeniorityBonusResult> {
    let years = years_of_service(hire_date, as_of)?;
    let rate = seniority_rate(years, bands)?;

    Ok(SeniorityBonusResult {
        years_of_service: years,
        rate,
        amount: round_money(base_salary * rate),
    })
}
