//! Configuration types for statutory payroll regimes.
//!
//! This module contains the strongly-typed jurisdiction configuration that
//! is deserialized from YAML files. One generic engine is parameterized by
//! one [`JurisdictionConfig`] per statutory regime; the crate ships a
//! Kenya-style and a Morocco-style configuration under `config/`.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Metadata about a jurisdiction configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short jurisdiction code (e.g., "KE", "MA").
    pub code: String,
    /// The human-readable name of the regime.
    pub name: String,
    /// ISO currency code amounts are denominated in.
    pub currency: String,
    /// The version or effective date of the rate tables.
    pub version: String,
}

/// A single progressive tax bracket.
///
/// Brackets are expressed in the sum-of-slices form: each bracket taxes the
/// slice of income between `lower` and `upper` at `rate`. Upper bounds are
/// inclusive; an amount exactly on a boundary belongs to the lower bracket.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracket {
    /// The lower bound of the bracket (first bracket starts at 0).
    pub lower: Decimal,
    /// The inclusive upper bound, or `None` for the unbounded top bracket.
    pub upper: Option<Decimal>,
    /// The marginal rate applied to the slice, as a fraction (0.30 = 30%).
    pub rate: Decimal,
}

/// The complete income tax table for a jurisdiction. All amounts monthly.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxTable {
    /// Ordered, contiguous progressive brackets.
    pub brackets: Vec<TaxBracket>,
    /// Flat personal relief subtracted from the resolved tax.
    pub personal_relief: Decimal,
    /// Relief per declared dependent.
    pub dependent_relief: Decimal,
    /// Maximum number of dependents that attract relief.
    pub max_dependents: u32,
    /// Ceiling on deductible mortgage interest per month.
    pub mortgage_interest_ceiling: Decimal,
}

/// The statutory concern a contribution line belongs to.
///
/// Employee-side lines are matched against the contribution-subject flags on
/// the employee profile by category; employer-only categories (family
/// allowance, training levy) have no employee-side flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionCategory {
    /// Capped pension / social security contribution.
    SocialSecurity,
    /// Health insurance contribution.
    Health,
    /// Housing levy contribution.
    HousingLevy,
    /// Employer-side family allowance contribution.
    FamilyAllowance,
    /// Employer-side professional training levy.
    TrainingLevy,
    /// Any other mandatory line.
    Other,
}

/// One mandatory contribution line (employee-side or employer-side).
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionLine {
    /// Stable identifier (e.g., "nssf", "cnss").
    pub code: String,
    /// Human-readable name for payslip rendering.
    pub name: String,
    /// The statutory concern this line covers.
    pub category: ContributionCategory,
    /// The contribution rate, as a fraction of the base.
    pub rate: Decimal,
    /// Optional cap on the contribution base: base = min(gross, cap).
    pub cap: Option<Decimal>,
}

/// Contribution tables split by payer side.
///
/// The employer-side table is independent from, and may be richer than, the
/// employee-side table.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsConfig {
    /// Lines withheld from the employee's pay.
    pub employee: Vec<ContributionLine>,
    /// Lines borne by the employer on top of gross pay.
    pub employer: Vec<ContributionLine>,
}

/// One band of the seniority bonus scale. Year bounds are inclusive.
#[derive(Debug, Clone, Deserialize)]
pub struct SeniorityBand {
    /// First year of service covered by this band.
    pub min_years: u32,
    /// Last year of service covered, or `None` for the unbounded top band.
    pub max_years: Option<u32>,
    /// Bonus rate applied to base salary, as a fraction.
    pub rate: Decimal,
}

/// Payroll computation rules outside the tax and contribution tables.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollRules {
    /// Professional-expense deduction rate applied to gross.
    pub professional_expense_rate: Decimal,
    /// Monthly ceiling on the professional-expense deduction.
    pub professional_expense_ceiling: Decimal,
    /// Whether the transport allowance is excluded from taxable income.
    pub transport_allowance_exempt: bool,
    /// The seniority bonus scale, contiguous from zero years.
    pub seniority_bands: Vec<SeniorityBand>,
}

fn default_delinquency_threshold() -> u32 {
    3
}

fn default_max_term_months() -> u32 {
    600
}

/// Credit computation rules.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditRules {
    /// Tax applied to the interest portion of each installment, as a
    /// fraction. Informational; does not alter the amortization recursion.
    pub interest_tax_rate: Decimal,
    /// Months in arrears beyond which a loan is considered suspended.
    #[serde(default = "default_delinquency_threshold")]
    pub delinquency_threshold_months: u32,
    /// Defensive upper bound on loan terms.
    #[serde(default = "default_max_term_months")]
    pub max_term_months: u32,
}

/// The complete jurisdiction configuration loaded from YAML files.
///
/// Constructed through [`JurisdictionConfig::new`], which validates every
/// table: a bracket table with gaps, an unordered band scale, or an empty
/// contribution list is a configuration defect and fails fast rather than
/// silently resolving to zero.
#[derive(Debug, Clone)]
pub struct JurisdictionConfig {
    /// Jurisdiction metadata.
    metadata: JurisdictionMetadata,
    /// Income tax table.
    tax: TaxTable,
    /// Contribution tables by payer side.
    contributions: ContributionsConfig,
    /// Payroll rules.
    payroll: PayrollRules,
    /// Credit rules.
    credit: CreditRules,
}

impl JurisdictionConfig {
    /// Creates a validated JurisdictionConfig from its component parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] when any table is empty,
    /// unordered, gapped, or carries a rate outside `[0, 1]`.
    pub fn new(
        metadata: JurisdictionMetadata,
        tax: TaxTable,
        contributions: ContributionsConfig,
        payroll: PayrollRules,
        credit: CreditRules,
    ) -> EngineResult<Self> {
        let config = Self {
            metadata,
            tax,
            contributions,
            payroll,
            credit,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns the income tax table.
    pub fn tax(&self) -> &TaxTable {
        &self.tax
    }

    /// Returns the contribution tables.
    pub fn contributions(&self) -> &ContributionsConfig {
        &self.contributions
    }

    /// Returns the payroll rules.
    pub fn payroll_rules(&self) -> &PayrollRules {
        &self.payroll
    }

    /// Returns the credit rules.
    pub fn credit_rules(&self) -> &CreditRules {
        &self.credit
    }

    fn validate(&self) -> EngineResult<()> {
        Self::validate_brackets(&self.tax.brackets)?;
        Self::validate_tax_amounts(&self.tax)?;
        Self::validate_contribution_lines("contributions.employee", &self.contributions.employee)?;
        Self::validate_contribution_lines("contributions.employer", &self.contributions.employer)?;
        Self::validate_payroll_rules(&self.payroll)?;
        Self::validate_seniority_bands(&self.payroll.seniority_bands)?;
        Self::validate_credit_rules(&self.credit)?;
        Ok(())
    }

    fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
        let table = "tax.brackets";

        if brackets.is_empty() {
            return Err(configuration(table, "bracket table is empty"));
        }

        let first = &brackets[0];
        if first.lower != Decimal::ZERO {
            return Err(configuration(
                table,
                format!("first bracket must start at 0, starts at {}", first.lower),
            ));
        }

        for (i, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(configuration(
                    table,
                    format!("bracket {} rate {} is outside [0, 1]", i + 1, bracket.rate),
                ));
            }

            match bracket.upper {
                Some(upper) => {
                    if i + 1 == brackets.len() {
                        return Err(configuration(
                            table,
                            "last bracket must be unbounded (no upper bound)",
                        ));
                    }
                    if upper <= bracket.lower {
                        return Err(configuration(
                            table,
                            format!(
                                "bracket {} upper bound {} does not exceed lower bound {}",
                                i + 1,
                                upper,
                                bracket.lower
                            ),
                        ));
                    }
                    let next = &brackets[i + 1];
                    if next.lower != upper {
                        return Err(configuration(
                            table,
                            format!("gap or overlap between {} and {}", upper, next.lower),
                        ));
                    }
                }
                None => {
                    if i + 1 != brackets.len() {
                        return Err(configuration(
                            table,
                            format!("bracket {} is unbounded but is not the last bracket", i + 1),
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_tax_amounts(tax: &TaxTable) -> EngineResult<()> {
        let table = "tax";
        if tax.personal_relief < Decimal::ZERO {
            return Err(configuration(table, "personal_relief must not be negative"));
        }
        if tax.dependent_relief < Decimal::ZERO {
            return Err(configuration(table, "dependent_relief must not be negative"));
        }
        if tax.mortgage_interest_ceiling < Decimal::ZERO {
            return Err(configuration(
                table,
                "mortgage_interest_ceiling must not be negative",
            ));
        }
        Ok(())
    }

    fn validate_contribution_lines(table: &str, lines: &[ContributionLine]) -> EngineResult<()> {
        for line in lines {
            if line.code.is_empty() {
                return Err(configuration(table, "contribution line has an empty code"));
            }
            if line.rate < Decimal::ZERO || line.rate > Decimal::ONE {
                return Err(configuration(
                    table,
                    format!("line '{}' rate {} is outside [0, 1]", line.code, line.rate),
                ));
            }
            if let Some(cap) = line.cap {
                if cap <= Decimal::ZERO {
                    return Err(configuration(
                        table,
                        format!("line '{}' cap {} must be positive", line.code, cap),
                    ));
                }
            }
        }

        for (i, line) in lines.iter().enumerate() {
            if lines[i + 1..].iter().any(|other| other.code == line.code) {
                return Err(configuration(
                    table,
                    format!("duplicate contribution code '{}'", line.code),
                ));
            }
        }

        Ok(())
    }

    fn validate_payroll_rules(rules: &PayrollRules) -> EngineResult<()> {
        let table = "payroll";
        if rules.professional_expense_rate < Decimal::ZERO
            || rules.professional_expense_rate > Decimal::ONE
        {
            return Err(configuration(
                table,
                format!(
                    "professional_expense_rate {} is outside [0, 1]",
                    rules.professional_expense_rate
                ),
            ));
        }
        if rules.professional_expense_ceiling < Decimal::ZERO {
            return Err(configuration(
                table,
                "professional_expense_ceiling must not be negative",
            ));
        }
        Ok(())
    }

    fn validate_seniority_bands(bands: &[SeniorityBand]) -> EngineResult<()> {
        let table = "payroll.seniority_bands";

        if bands.is_empty() {
            return Err(configuration(table, "seniority band table is empty"));
        }

        if bands[0].min_years != 0 {
            return Err(configuration(
                table,
                format!(
                    "first band must start at 0 years, starts at {}",
                    bands[0].min_years
                ),
            ));
        }

        for (i, band) in bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return Err(configuration(
                    table,
                    format!("band {} rate {} is outside [0, 1]", i + 1, band.rate),
                ));
            }

            match band.max_years {
                Some(max_years) => {
                    if i + 1 == bands.len() {
                        return Err(configuration(
                            table,
                            "last band must be unbounded (no max_years)",
                        ));
                    }
                    if max_years < band.min_years {
                        return Err(configuration(
                            table,
                            format!(
                                "band {} max_years {} is below min_years {}",
                                i + 1,
                                max_years,
                                band.min_years
                            ),
                        ));
                    }
                    let next = &bands[i + 1];
                    if next.min_years != max_years + 1 {
                        return Err(configuration(
                            table,
                            format!(
                                "gap or overlap between year {} and year {}",
                                max_years, next.min_years
                            ),
                        ));
                    }
                }
                None => {
                    if i + 1 != bands.len() {
                        return Err(configuration(
                            table,
                            format!("band {} is unbounded but is not the last band", i + 1),
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_credit_rules(credit: &CreditRules) -> EngineResult<()> {
        let table = "credit";
        if credit.interest_tax_rate < Decimal::ZERO || credit.interest_tax_rate > Decimal::ONE {
            return Err(configuration(
                table,
                format!(
                    "interest_tax_rate {} is outside [0, 1]",
                    credit.interest_tax_rate
                ),
            ));
        }
        if credit.max_term_months == 0 || credit.max_term_months > 600 {
            return Err(configuration(
                table,
                format!(
                    "max_term_months {} is outside [1, 600]",
                    credit.max_term_months
                ),
            ));
        }
        Ok(())
    }
}

fn configuration(table: &str, message: impl Into<String>) -> EngineError {
    EngineError::Configuration {
        table: table.to_string(),
        message: message.into(),
    }
}
