//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and its associated
//! structures that capture all outputs from a payroll calculation: itemized
//! contributions, the tax computation, deduction lines, totals, and the
//! audit trace. A result is constructed fresh on every invocation and never
//! persisted by the engine itself.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The category of a deduction line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionCategory {
    /// A statutory employee-side contribution.
    Statutory,
    /// Income tax after relief.
    IncomeTax,
    /// A loan installment.
    Loan,
    /// A salary advance repayment.
    Advance,
    /// A period variable element withheld from pay.
    Element,
    /// An elective insurance premium.
    Insurance,
}

/// A single itemized deduction on the payslip.
///
/// `total_deductions` on the result equals the sum of these lines, with no
/// double counting: statutory lines appear here once, mirrored from the
/// employee contribution set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// Stable code for reporting (e.g., "nssf", "paye", "loan").
    pub code: String,
    /// Human-readable label for payslip rendering.
    pub label: String,
    /// The category of the deduction.
    pub category: DeductionCategory,
    /// The deducted amount, rounded to 2 decimal places.
    pub amount: Decimal,
}

/// One statutory contribution line with its computation details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionAmount {
    /// The configured line code.
    pub code: String,
    /// The configured line name.
    pub name: String,
    /// The contribution base after any cap: `min(gross, cap)`.
    pub base: Decimal,
    /// The configured rate.
    pub rate: Decimal,
    /// The contribution amount, rounded to 2 decimal places.
    pub amount: Decimal,
}

/// The itemized statutory contributions for one payer side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSet {
    /// The individual contribution lines.
    pub lines: Vec<ContributionAmount>,
    /// Sum of the rounded line amounts.
    pub total: Decimal,
}

impl ContributionSet {
    /// An empty contribution set.
    pub fn empty() -> Self {
        Self {
            lines: vec![],
            total: Decimal::ZERO,
        }
    }
}

/// The step-by-step income tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputation {
    /// Professional-expense deduction: `min(rate × gross, ceiling)`.
    pub professional_expense_deduction: Decimal,
    /// Gross minus professional expenses, exempt allowances, and employee
    /// statutory contributions.
    pub taxable_net: Decimal,
    /// Mortgage interest actually deducted (input capped at the ceiling).
    pub deductible_interest: Decimal,
    /// Taxable net minus deductible interest, floored at zero.
    pub net_taxable_income: Decimal,
    /// Tax resolved from the bracket table before any relief.
    pub tax_before_relief: Decimal,
    /// Personal plus dependent relief applied.
    pub relief: Decimal,
    /// Final income tax: `max(0, tax_before_relief − relief)`.
    pub income_tax: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Statutory reference for this rule (regulation, table version).
    pub reference: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that don't prevent calculation but may
/// require attention (e.g., a net pay at or below zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// Records every decision made during the calculation for transparency and
/// statutory compliance review. Carries no timing or random identifiers:
/// identical inputs must produce identical traces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a payroll calculation.
///
/// Invariants upheld by the calculator:
/// - `net_salary_payable = gross_salary − total_deductions`
/// - `total_deductions` equals the sum of every line in `deductions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The ID of the employee the calculation is for.
    pub employee_id: String,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The date the calculation was run for (explicit "now").
    pub as_of: NaiveDate,
    /// Gross salary: base + seniority bonus + allowances + period gains.
    pub gross_salary: Decimal,
    /// The seniority bonus rate resolved from years of service.
    pub seniority_rate: Decimal,
    /// The seniority bonus amount included in gross.
    pub seniority_bonus: Decimal,
    /// The income tax computation.
    pub tax: TaxComputation,
    /// Employee-side statutory contributions.
    pub employee_contributions: ContributionSet,
    /// Employer-side statutory contributions (not deducted from pay).
    pub employer_contributions: ContributionSet,
    /// Every itemized deduction line (statutory + tax + elective).
    pub deductions: Vec<DeductionLine>,
    /// Sum of all deduction lines.
    pub total_deductions: Decimal,
    /// Amount actually paid to the employee.
    pub net_salary_payable: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
