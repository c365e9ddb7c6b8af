//! Period inputs to a payroll calculation.
//!
//! Variable elements and credit installments are resolved by the caller
//! (persistence filters active records for the employee and period) and
//! handed to the calculator as plain numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a variable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Adds to gross salary (bonus, overtime, commission).
    Gain,
    /// Withheld from net pay (absence, lateness, ad-hoc deduction).
    Deduction,
}

/// A one-off pay element for the period.
///
/// Amounts are always non-negative; direction is carried by [`ElementKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableElement {
    /// Stable code for reporting (e.g., "overtime", "absence").
    pub code: String,
    /// Human-readable label for payslip rendering.
    pub label: String,
    /// Whether the element adds to gross or is withheld from net.
    pub kind: ElementKind,
    /// The non-negative amount.
    pub amount: Decimal,
}

/// Everything the payroll calculator needs for one period beyond the
/// employee profile and the jurisdiction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollInputs {
    /// Period variable elements (gains and deductions).
    #[serde(default)]
    pub variable_elements: Vec<VariableElement>,
    /// Monthly installments of active loans.
    #[serde(default)]
    pub loan_installments: Vec<Decimal>,
    /// Monthly repayments of active salary advances.
    #[serde(default)]
    pub advance_installments: Vec<Decimal>,
    /// Mortgage interest paid this month, deductible up to the
    /// jurisdiction ceiling.
    #[serde(default)]
    pub mortgage_interest_paid: Decimal,
}

impl PayrollInputs {
    /// Sum of the period's gain elements.
    pub fn total_gains(&self) -> Decimal {
        self.variable_elements
            .iter()
            .filter(|e| e.kind == ElementKind::Gain)
            .map(|e| e.amount)
            .sum()
    }

    /// Sum of the period's deduction elements.
    pub fn total_element_deductions(&self) -> Decimal {
        self.variable_elements
            .iter()
            .filter(|e| e.kind == ElementKind::Deduction)
            .map(|e| e.amount)
            .sum()
    }

    /// Sum of all loan and advance installments.
    pub fn total_installments(&self) -> Decimal {
        self.loan_installments.iter().sum::<Decimal>()
            + self.advance_installments.iter().sum::<Decimal>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn element(code: &str, kind: ElementKind, amount: &str) -> VariableElement {
        VariableElement {
            code: code.to_string(),
            label: code.to_string(),
            kind,
            amount: dec(amount),
        }
    }

    #[test]
    fn test_total_gains_only_sums_gains() {
        let inputs = PayrollInputs {
            variable_elements: vec![
                element("overtime", ElementKind::Gain, "5000"),
                element("bonus", ElementKind::Gain, "10000"),
                element("absence", ElementKind::Deduction, "2000"),
            ],
            ..Default::default()
        };

        assert_eq!(inputs.total_gains(), dec("15000"));
        assert_eq!(inputs.total_element_deductions(), dec("2000"));
    }

    #[test]
    fn test_total_installments_sums_loans_and_advances() {
        let inputs = PayrollInputs {
            loan_installments: vec![dec("4500"), dec("1200")],
            advance_installments: vec![dec("800")],
            ..Default::default()
        };

        assert_eq!(inputs.total_installments(), dec("6500"));
    }

    #[test]
    fn test_default_inputs_are_empty() {
        let inputs = PayrollInputs::default();
        assert_eq!(inputs.total_gains(), Decimal::ZERO);
        assert_eq!(inputs.total_element_deductions(), Decimal::ZERO);
        assert_eq!(inputs.total_installments(), Decimal::ZERO);
        assert_eq!(inputs.mortgage_interest_paid, Decimal::ZERO);
    }

    #[test]
    fn test_element_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ElementKind::Gain).unwrap(),
            "\"gain\""
        );
        assert_eq!(
            serde_json::to_string(&ElementKind::Deduction).unwrap(),
            "\"deduction\""
        );
    }

    #[test]
    fn test_deserialize_inputs_with_defaults() {
        let json = r#"{"loan_installments": ["4500"]}"#;
        let inputs: PayrollInputs = serde_json::from_str(json).unwrap();

        assert!(inputs.variable_elements.is_empty());
        assert_eq!(inputs.loan_installments, vec![dec("4500")]);
        assert!(inputs.advance_installments.is_empty());
    }
}
