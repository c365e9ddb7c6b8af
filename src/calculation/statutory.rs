//! Statutory contribution calculation.
//!
//! Computes the mandatory social-security/health/housing-levy lines from a
//! gross pay figure, applying caps and rates. The employee-side and
//! employer-side tables are independent; the employer side is often richer
//! (family allowance, training levy).

use rust_decimal::Decimal;

use crate::config::{ContributionLine, JurisdictionConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{ContributionAmount, ContributionSet, EmployeeCompensationProfile};

use super::round_money;

/// Calculates the employee-side statutory contributions on a gross pay.
///
/// Each line's base is `min(gross, cap)` when a cap is configured, else the
/// full gross. Lines whose category the profile is not subject to are
/// skipped. Every line amount is rounded to 2 decimal places once, at the
/// final output; the set total is the sum of the rounded lines.
///
/// # Arguments
///
/// * `gross` - The gross pay for the period
/// * `profile` - The employee profile carrying the contribution-subject flags
/// * `config` - The jurisdiction configuration
///
/// # Returns
///
/// Returns the itemized [`ContributionSet`], or [`EngineError::InvalidInput`]
/// for a negative gross.
pub fn calculate_employee_contributions(
    gross: Decimal,
    profile: &EmployeeCompensationProfile,
    config: &JurisdictionConfig,
) -> EngineResult<ContributionSet> {
    contribution_set(gross, &config.contributions().employee, profile)
}

/// Calculates the employer-side statutory contributions on a gross pay.
///
/// Employer lines follow the same cap and rounding rules as employee lines
/// and respect the same subject flags: an employee exempt from social
/// security attracts no employer-side social security either.
pub fn calculate_employer_contributions(
    gross: Decimal,
    profile: &EmployeeCompensationProfile,
    config: &JurisdictionConfig,
) -> EngineResult<ContributionSet> {
    contribution_set(gross, &config.contributions().employer, profile)
}

fn contribution_set(
    gross: Decimal,
    lines: &[ContributionLine],
    profile: &EmployeeCompensationProfile,
) -> EngineResult<ContributionSet> {
    if gross < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "gross".to_string(),
            message: format!("must not be negative, got {}", gross),
        });
    }

    let mut amounts = Vec::new();
    let mut total = Decimal::ZERO;

    for line in lines {
        if !profile.is_subject_to(line.category) {
            continue;
        }

        let base = match line.cap {
            Some(cap) => gross.min(cap),
            None => gross,
        };
        let amount = round_money(base * line.rate);

        total += amount;
        amounts.push(ContributionAmount {
            code: line.code.clone(),
            name: line.name.clone(),
            base,
            rate: line.rate,
            amount,
        });
    }

    Ok(ContributionSet {
        lines: amounts,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ContributionCategory, ContributionsConfig, CreditRules, JurisdictionConfig,
        JurisdictionMetadata, PayrollRules, SeniorityBand, TaxBracket, TaxTable,
    };
    use crate::models::MaritalStatus;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(
        code: &str,
        category: ContributionCategory,
        rate: &str,
        cap: Option<&str>,
    ) -> ContributionLine {
        ContributionLine {
            code: code.to_string(),
            name: code.to_string(),
            category,
            rate: dec(rate),
            cap: cap.map(dec),
        }
    }

    fn kenya_style_config() -> JurisdictionConfig {
        JurisdictionConfig::new(
            JurisdictionMetadata {
                code: "KE".to_string(),
                name: "Kenya statutory regime".to_string(),
                currency: "KES".to_string(),
                version: "2025-01".to_string(),
            },
            TaxTable {
                brackets: vec![
                    TaxBracket {
                        lower: dec("0"),
                        upper: Some(dec("24000")),
                        rate: dec("0.10"),
                    },
                    TaxBracket {
                        lower: dec("24000"),
                        upper: None,
                        rate: dec("0.30"),
                    },
                ],
                personal_relief: dec("2400"),
                dependent_relief: dec("0"),
                max_dependents: 0,
                mortgage_interest_ceiling: dec("25000"),
            },
            ContributionsConfig {
                employee: vec![
                    line("nssf", ContributionCategory::SocialSecurity, "0.06", Some("36000")),
                    line("shif", ContributionCategory::Health, "0.0275", None),
                    line("housing_levy", ContributionCategory::HousingLevy, "0.015", None),
                ],
                employer: vec![
                    line("nssf", ContributionCategory::SocialSecurity, "0.06", Some("36000")),
                    line("housing_levy", ContributionCategory::HousingLevy, "0.015", None),
                    line("training_levy", ContributionCategory::TrainingLevy, "0.016", None),
                ],
            },
            PayrollRules {
                professional_expense_rate: dec("0"),
                professional_expense_ceiling: dec("0"),
                transport_allowance_exempt: false,
                seniority_bands: vec![SeniorityBand {
                    min_years: 0,
                    max_years: None,
                    rate: dec("0"),
                }],
            },
            CreditRules {
                interest_tax_rate: dec("0"),
                delinquency_threshold_months: 3,
                max_term_months: 600,
            },
        )
        .unwrap()
    }

    fn subject_profile() -> EmployeeCompensationProfile {
        EmployeeCompensationProfile {
            id: "emp_001".to_string(),
            base_salary: dec("50000"),
            housing_allowance: dec("0"),
            meal_allowance: dec("0"),
            transport_allowance: dec("0"),
            representation_allowance: dec("0"),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            marital_status: MaritalStatus::Single,
            dependents: 0,
            subject_to_social_security: true,
            subject_to_health: true,
            subject_to_housing_levy: true,
            insurance_premium: None,
        }
    }

    /// SC-001: capped line uses min(gross, cap) as base
    #[test]
    fn test_capped_line_uses_min_of_gross_and_cap() {
        let config = kenya_style_config();
        let profile = subject_profile();

        let set = calculate_employee_contributions(dec("50000"), &profile, &config).unwrap();

        let nssf = set.lines.iter().find(|l| l.code == "nssf").unwrap();
        assert_eq!(nssf.base, dec("36000"));
        assert_eq!(nssf.amount, dec("2160.00"));
    }

    /// SC-002: uncapped line uses the full gross
    #[test]
    fn test_uncapped_line_uses_full_gross() {
        let config = kenya_style_config();
        let profile = subject_profile();

        let set = calculate_employee_contributions(dec("50000"), &profile, &config).unwrap();

        let shif = set.lines.iter().find(|l| l.code == "shif").unwrap();
        assert_eq!(shif.base, dec("50000"));
        assert_eq!(shif.amount, dec("1375.00"));
    }

    /// SC-003: total is the sum of the rounded lines
    #[test]
    fn test_total_is_sum_of_rounded_lines() {
        let config = kenya_style_config();
        let profile = subject_profile();

        let set = calculate_employee_contributions(dec("50000"), &profile, &config).unwrap();

        // 2,160 (nssf) + 1,375 (shif) + 750 (housing levy)
        assert_eq!(set.total, dec("4285.00"));
        let sum: Decimal = set.lines.iter().map(|l| l.amount).sum();
        assert_eq!(set.total, sum);
    }

    /// SC-004: gross below the cap leaves the base uncapped
    #[test]
    fn test_gross_below_cap_uses_gross() {
        let config = kenya_style_config();
        let profile = subject_profile();

        let set = calculate_employee_contributions(dec("20000"), &profile, &config).unwrap();

        let nssf = set.lines.iter().find(|l| l.code == "nssf").unwrap();
        assert_eq!(nssf.base, dec("20000"));
        assert_eq!(nssf.amount, dec("1200.00"));
    }

    /// SC-005: opted-out categories are skipped
    #[test]
    fn test_opted_out_category_is_skipped() {
        let config = kenya_style_config();
        let mut profile = subject_profile();
        profile.subject_to_health = false;

        let set = calculate_employee_contributions(dec("50000"), &profile, &config).unwrap();

        assert!(set.lines.iter().all(|l| l.code != "shif"));
        assert_eq!(set.total, dec("2910.00"));
    }

    /// SC-006: employer table is independent of the employee table
    #[test]
    fn test_employer_table_is_independent() {
        let config = kenya_style_config();
        let profile = subject_profile();

        let set = calculate_employer_contributions(dec("50000"), &profile, &config).unwrap();

        // Employer pays a training levy the employee never sees.
        assert!(set.lines.iter().any(|l| l.code == "training_levy"));
        // 2,160 + 750 + 800
        assert_eq!(set.total, dec("3710.00"));
    }

    #[test]
    fn test_negative_gross_is_invalid_input() {
        let config = kenya_style_config();
        let profile = subject_profile();

        let result = calculate_employee_contributions(dec("-1"), &profile, &config);
        match result.unwrap_err() {
            EngineError::InvalidInput { field, .. } => assert_eq!(field, "gross"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_gross_yields_zero_lines() {
        let config = kenya_style_config();
        let profile = subject_profile();

        let set = calculate_employee_contributions(dec("0"), &profile, &config).unwrap();
        assert_eq!(set.total, dec("0"));
        assert!(set.lines.iter().all(|l| l.amount == Decimal::ZERO));
    }

    #[test]
    fn test_rounding_applied_once_at_line_output() {
        let config = kenya_style_config();
        let profile = subject_profile();

        // 33,333 × 0.0275 = 916.6575 → 916.66 (half away from zero)
        let set = calculate_employee_contributions(dec("33333"), &profile, &config).unwrap();
        let shif = set.lines.iter().find(|l| l.code == "shif").unwrap();
        assert_eq!(shif.amount, dec("916.66"));
    }
}
