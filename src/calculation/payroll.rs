//! Payroll calculation orchestration.
//!
//! Assembles a complete [`PayrollResult`] from an employee profile, the
//! period inputs, and a jurisdiction configuration. The processing order is
//! fixed, since later steps depend on earlier totals:
//!
//! 1. seniority bonus from years of service
//! 2. gross salary = base + bonus + fixed allowances + period gains
//! 3. statutory employee/employer contributions from gross
//! 4. taxable net = gross − professional-expense deduction − exempt
//!    allowances − employee contributions
//! 5. net taxable income = taxable net − deductible mortgage interest
//! 6. income tax from the bracket table, minus relief, floored at zero
//! 7. elective deductions (loans, advances, elements, insurance)
//! 8. total deductions = employee contributions + income tax + electives
//! 9. net salary payable = gross − total deductions

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::JurisdictionConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DeductionCategory, DeductionLine,
    EmployeeCompensationProfile, PayrollInputs, PayrollResult, TaxComputation,
};

use super::{
    calculate_employee_contributions, calculate_employer_contributions, resolve_income_tax,
    round_money, seniority_bonus,
};

/// The engine version stamped on every result.
const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Calculates a complete payslip for one employee and one period.
///
/// The profile and inputs are immutable snapshots; the function is pure and
/// deterministic — identical inputs (including `as_of`) produce identical
/// results, which makes payslip regeneration idempotent.
///
/// # Arguments
///
/// * `profile` - The employee's compensation snapshot
/// * `inputs` - The period's variable elements and credit installments
/// * `config` - The jurisdiction configuration
/// * `as_of` - The explicit calculation date ("now")
///
/// # Returns
///
/// Returns the itemized [`PayrollResult`], or:
/// - [`EngineError::InvalidInput`] for a negative salary, allowance,
///   element amount, installment, or premium
/// - [`EngineError::Configuration`] when a tax bracket or seniority band
///   fails to resolve
pub fn calculate_payroll(
    profile: &EmployeeCompensationProfile,
    inputs: &PayrollInputs,
    config: &JurisdictionConfig,
    as_of: chrono::NaiveDate,
) -> EngineResult<PayrollResult> {
    validate_inputs(profile, inputs)?;
    debug!(employee_id = %profile.id, %as_of, "calculating payroll");

    let mut steps = Vec::new();
    let mut warnings = Vec::new();
    let tax_table = config.tax();
    let rules = config.payroll_rules();
    let table_version = config.metadata().version.clone();

    // Step 1: seniority bonus.
    let seniority = seniority_bonus(
        profile.base_salary,
        profile.hire_date,
        as_of,
        &rules.seniority_bands,
    )?;
    steps.push(AuditStep {
        step_number: 1,
        rule_id: "seniority_bonus".to_string(),
        rule_name: "Seniority Bonus".to_string(),
        reference: format!("seniority scale {}", table_version),
        input: serde_json::json!({
            "hire_date": profile.hire_date.to_string(),
            "as_of": as_of.to_string(),
            "base_salary": profile.base_salary.to_string()
        }),
        output: serde_json::json!({
            "years_of_service": seniority.years_of_service,
            "rate": seniority.rate.to_string(),
            "amount": seniority.amount.to_string()
        }),
        reasoning: format!(
            "{} whole years of service resolve to a {} bonus rate",
            seniority.years_of_service, seniority.rate
        ),
    });

    // Step 2: gross salary.
    let gains = inputs.total_gains();
    let gross_salary = round_money(
        profile.base_salary + seniority.amount + profile.total_allowances() + gains,
    );
    steps.push(AuditStep {
        step_number: 2,
        rule_id: "gross_salary".to_string(),
        rule_name: "Gross Salary".to_string(),
        reference: format!("payroll rules {}", table_version),
        input: serde_json::json!({
            "base_salary": profile.base_salary.to_string(),
            "seniority_bonus": seniority.amount.to_string(),
            "allowances": profile.total_allowances().to_string(),
            "period_gains": gains.to_string()
        }),
        output: serde_json::json!({ "gross_salary": gross_salary.to_string() }),
        reasoning: "Gross is base plus seniority bonus, fixed allowances, and period gains"
            .to_string(),
    });

    // Step 3: statutory contributions, both sides.
    let employee_contributions = calculate_employee_contributions(gross_salary, profile, config)?;
    let employer_contributions = calculate_employer_contributions(gross_salary, profile, config)?;
    steps.push(AuditStep {
        step_number: 3,
        rule_id: "statutory_contributions".to_string(),
        rule_name: "Statutory Contributions".to_string(),
        reference: format!("contribution tables {}", table_version),
        input: serde_json::json!({ "gross_salary": gross_salary.to_string() }),
        output: serde_json::json!({
            "employee_total": employee_contributions.total.to_string(),
            "employer_total": employer_contributions.total.to_string()
        }),
        reasoning: format!(
            "{} employee lines and {} employer lines computed on capped bases",
            employee_contributions.lines.len(),
            employer_contributions.lines.len()
        ),
    });

    // Steps 4-5: taxable net and net taxable income.
    let professional_expense_deduction = round_money(
        (gross_salary * rules.professional_expense_rate).min(rules.professional_expense_ceiling),
    );
    let exempt_allowances = if rules.transport_allowance_exempt {
        profile.transport_allowance
    } else {
        Decimal::ZERO
    };
    let taxable_net = gross_salary
        - professional_expense_deduction
        - exempt_allowances
        - employee_contributions.total;
    let deductible_interest = inputs
        .mortgage_interest_paid
        .min(tax_table.mortgage_interest_ceiling);
    let net_taxable_income = (taxable_net - deductible_interest).max(Decimal::ZERO);
    steps.push(AuditStep {
        step_number: 4,
        rule_id: "taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        reference: format!("tax rules {}", table_version),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "professional_expense_deduction": professional_expense_deduction.to_string(),
            "exempt_allowances": exempt_allowances.to_string(),
            "employee_contributions": employee_contributions.total.to_string(),
            "mortgage_interest_paid": inputs.mortgage_interest_paid.to_string()
        }),
        output: serde_json::json!({
            "taxable_net": taxable_net.to_string(),
            "deductible_interest": deductible_interest.to_string(),
            "net_taxable_income": net_taxable_income.to_string()
        }),
        reasoning: format!(
            "Deductible interest capped at the {} monthly ceiling",
            tax_table.mortgage_interest_ceiling
        ),
    });

    // Step 6: income tax minus relief, floored at zero.
    let tax_before_relief = round_money(resolve_income_tax(net_taxable_income, tax_table)?);
    let dependents_counted = profile.dependents.min(tax_table.max_dependents);
    let relief =
        tax_table.personal_relief + tax_table.dependent_relief * Decimal::from(dependents_counted);
    let income_tax = (tax_before_relief - relief).max(Decimal::ZERO);
    if income_tax.is_zero() && tax_before_relief > Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "RELIEF_EXCEEDS_TAX".to_string(),
            message: "relief fully offsets the resolved income tax".to_string(),
            severity: "low".to_string(),
        });
    }
    steps.push(AuditStep {
        step_number: 5,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax".to_string(),
        reference: format!("tax brackets {}", table_version),
        input: serde_json::json!({
            "net_taxable_income": net_taxable_income.to_string(),
            "dependents_counted": dependents_counted
        }),
        output: serde_json::json!({
            "tax_before_relief": tax_before_relief.to_string(),
            "relief": relief.to_string(),
            "income_tax": income_tax.to_string()
        }),
        reasoning: "Progressive bracket tax minus personal and dependent relief, floored at zero"
            .to_string(),
    });

    // Steps 7-8: itemized deductions.
    let mut deductions = Vec::new();
    for line in &employee_contributions.lines {
        deductions.push(DeductionLine {
            code: line.code.clone(),
            label: line.name.clone(),
            category: DeductionCategory::Statutory,
            amount: line.amount,
        });
    }
    deductions.push(DeductionLine {
        code: "income_tax".to_string(),
        label: "Income tax".to_string(),
        category: DeductionCategory::IncomeTax,
        amount: income_tax,
    });
    for (i, installment) in inputs.loan_installments.iter().enumerate() {
        deductions.push(DeductionLine {
            code: format!("loan_{}", i + 1),
            label: "Loan installment".to_string(),
            category: DeductionCategory::Loan,
            amount: *installment,
        });
    }
    for (i, installment) in inputs.advance_installments.iter().enumerate() {
        deductions.push(DeductionLine {
            code: format!("advance_{}", i + 1),
            label: "Salary advance repayment".to_string(),
            category: DeductionCategory::Advance,
            amount: *installment,
        });
    }
    for element in &inputs.variable_elements {
        if element.kind == crate::models::ElementKind::Deduction {
            deductions.push(DeductionLine {
                code: element.code.clone(),
                label: element.label.clone(),
                category: DeductionCategory::Element,
                amount: element.amount,
            });
        }
    }
    if let Some(premium) = profile.insurance_premium {
        deductions.push(DeductionLine {
            code: "insurance".to_string(),
            label: "Insurance premium".to_string(),
            category: DeductionCategory::Insurance,
            amount: premium,
        });
    }

    let total_deductions: Decimal = deductions.iter().map(|d| d.amount).sum();

    // Step 9: net salary payable.
    let net_salary_payable = gross_salary - total_deductions;
    if net_salary_payable <= Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NET_PAY_NON_POSITIVE".to_string(),
            message: format!("net salary payable is {}", net_salary_payable),
            severity: "high".to_string(),
        });
    }
    steps.push(AuditStep {
        step_number: 6,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary Payable".to_string(),
        reference: format!("payroll rules {}", table_version),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "total_deductions": total_deductions.to_string(),
            "deduction_lines": deductions.len()
        }),
        output: serde_json::json!({ "net_salary_payable": net_salary_payable.to_string() }),
        reasoning: "Net is gross minus the sum of every itemized deduction line".to_string(),
    });

    debug!(employee_id = %profile.id, %net_salary_payable, "payroll calculated");

    Ok(PayrollResult {
        employee_id: profile.id.clone(),
        engine_version: ENGINE_VERSION.to_string(),
        as_of,
        gross_salary,
        seniority_rate: seniority.rate,
        seniority_bonus: seniority.amount,
        tax: TaxComputation {
            professional_expense_deduction,
            taxable_net,
            deductible_interest,
            net_taxable_income,
            tax_before_relief,
            relief,
            income_tax,
        },
        employee_contributions,
        employer_contributions,
        deductions,
        total_deductions,
        net_salary_payable,
        audit_trace: AuditTrace { steps, warnings },
    })
}

fn validate_inputs(
    profile: &EmployeeCompensationProfile,
    inputs: &PayrollInputs,
) -> EngineResult<()> {
    let non_negative = |field: &str, value: Decimal| -> EngineResult<()> {
        if value < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: field.to_string(),
                message: format!("must not be negative, got {}", value),
            });
        }
        Ok(())
    };

    non_negative("base_salary", profile.base_salary)?;
    non_negative("housing_allowance", profile.housing_allowance)?;
    non_negative("meal_allowance", profile.meal_allowance)?;
    non_negative("transport_allowance", profile.transport_allowance)?;
    non_negative("representation_allowance", profile.representation_allowance)?;
    if let Some(premium) = profile.insurance_premium {
        non_negative("insurance_premium", premium)?;
    }
    for element in &inputs.variable_elements {
        if element.amount < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: format!("variable_elements.{}", element.code),
                message: format!(
                    "amounts carry direction through their kind; got {}",
                    element.amount
                ),
            });
        }
    }
    for installment in &inputs.loan_installments {
        non_negative("loan_installments", *installment)?;
    }
    for installment in &inputs.advance_installments {
        non_negative("advance_installments", *installment)?;
    }
    non_negative("mortgage_interest_paid", inputs.mortgage_interest_paid)?;

    Ok(())
}
