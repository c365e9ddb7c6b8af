//! Loan contract, amortization, and repayment-progress models.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A loan contract as the engine sees it.
///
/// The monthly payment is part of the contract: it is either derived
/// analytically (see [`crate::calculation::monthly_payment`]) or stored from
/// the original agreement. When derived, the fully amortizing schedule over
/// the term reduces the remaining balance to zero at the final installment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanContract {
    /// Unique identifier for the loan.
    pub id: String,
    /// The principal amount lent.
    pub principal: Decimal,
    /// Nominal annual interest rate, as a fraction (0.06 = 6%).
    pub annual_rate: Decimal,
    /// Term of the loan in months.
    pub term_months: u32,
    /// The date the loan was disbursed. The first installment falls due one
    /// month later.
    pub start_date: NaiveDate,
    /// Optional monthly insurance rate applied to the original principal.
    #[serde(default)]
    pub insurance_rate: Option<Decimal>,
    /// The contractual monthly payment (principal + interest).
    pub monthly_payment: Decimal,
}

impl LoanContract {
    /// Builds a contract with the monthly payment derived from the annuity
    /// formula (see [`crate::calculation::monthly_payment`]).
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidInput`] for a
    /// non-positive principal, a negative rate, or a zero term.
    pub fn with_derived_payment(
        id: String,
        principal: Decimal,
        annual_rate: Decimal,
        term_months: u32,
        start_date: NaiveDate,
        insurance_rate: Option<Decimal>,
    ) -> crate::error::EngineResult<Self> {
        let monthly_payment =
            crate::calculation::monthly_payment(principal, annual_rate, term_months)?;
        Ok(Self {
            id,
            principal,
            annual_rate,
            term_months,
            start_date,
            insurance_rate,
            monthly_payment,
        })
    }

    /// The contractual end date: start date plus the term in months.
    ///
    /// Returns `None` only when the date arithmetic overflows chrono's
    /// representable range.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.start_date.checked_add_months(Months::new(self.term_months))
    }
}

/// One row of an amortization schedule.
///
/// Installment numbers are 1-based and contiguous. The interest-tax and
/// insurance lines are informational: they do not participate in the
/// principal recursion, so `principal + interest = total_payment −
/// interest_tax − insurance` holds for every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationInstallment {
    /// The 1-based installment index.
    pub number: u32,
    /// The due date: start date plus `number` months.
    pub due_date: NaiveDate,
    /// The principal portion of the payment.
    pub principal: Decimal,
    /// The pre-tax interest portion of the payment.
    pub interest: Decimal,
    /// Tax on the interest portion, per the jurisdiction's rate.
    pub interest_tax: Decimal,
    /// The insurance portion, if the contract carries an insurance rate.
    pub insurance: Decimal,
    /// The total amount due for this installment.
    pub total_payment: Decimal,
    /// The remaining principal after this payment. Exactly zero on the
    /// final installment.
    pub remaining_principal: Decimal,
}

/// The derived status of a loan at a point in time.
///
/// This is a computed view, re-derived on each call; `Suspended` and
/// `PaidOff` are terminal in the sense that later assessments with the same
/// authoritative repaid amount derive the same status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Repayment is on foot and within the delinquency threshold.
    Active,
    /// The repaid amount covers the principal.
    PaidOff,
    /// Past the end date without full repayment, or in arrears beyond the
    /// configured threshold.
    Suspended,
}

/// A point-in-time view of repayment progress.
///
/// Recomputed on demand from the contract, the authoritative repaid amount
/// (caller-supplied, from storage), and an explicit "now"; never itself the
/// system of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditProgressSnapshot {
    /// Whole installment periods elapsed since the start date, clamped to
    /// `[0, term_months]`.
    pub elapsed_installments: u32,
    /// Amount that should have been repaid by now: elapsed × payment.
    pub expected_repaid: Decimal,
    /// The actual amount repaid (caller-supplied, authoritative).
    pub amount_repaid: Decimal,
    /// Principal minus amount repaid, floored at zero.
    pub remaining_balance: Decimal,
    /// `min(100, amount_repaid / principal × 100)`, rounded to 2 dp.
    pub progress_percent: Decimal,
    /// Whether less has been repaid than expected with at least one period
    /// elapsed.
    pub delinquent: bool,
    /// Whole months of payments behind, clamped to the elapsed periods.
    pub months_in_arrears: u32,
    /// The derived status.
    pub status: LoanStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_contract() -> LoanContract {
        LoanContract {
            id: "loan_001".to_string(),
            principal: dec("500000"),
            annual_rate: dec("0.06"),
            term_months: 120,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            insurance_rate: None,
            monthly_payment: dec("5551.03"),
        }
    }

    #[test]
    fn test_with_derived_payment_solves_annuity() {
        let contract = LoanContract::with_derived_payment(
            "loan_003".to_string(),
            dec("500000"),
            dec("0.06"),
            120,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            None,
        )
        .unwrap();

        assert_eq!(contract.monthly_payment, dec("5551.03"));
    }

    #[test]
    fn test_end_date_adds_term_months() {
        let contract = create_test_contract();
        assert_eq!(
            contract.end_date(),
            Some(NaiveDate::from_ymd_opt(2034, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_end_date_clamps_to_shorter_month() {
        let mut contract = create_test_contract();
        contract.start_date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        contract.term_months = 1;

        // January 31st + 1 month clamps to February 29th (2024 is a leap year).
        assert_eq!(
            contract.end_date(),
            Some(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn test_contract_deserialization_defaults_insurance() {
        let json = r#"{
            "id": "loan_002",
            "principal": "200000",
            "annual_rate": "0.045",
            "term_months": 60,
            "start_date": "2025-03-01",
            "monthly_payment": "3729.98"
        }"#;

        let contract: LoanContract = serde_json::from_str(json).unwrap();
        assert_eq!(contract.insurance_rate, None);
        assert_eq!(contract.term_months, 60);
    }

    #[test]
    fn test_loan_status_serialization() {
        assert_eq!(
            serde_json::to_string(&LoanStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&LoanStatus::PaidOff).unwrap(),
            "\"paid_off\""
        );
        assert_eq!(
            serde_json::to_string(&LoanStatus::Suspended).unwrap(),
            "\"suspended\""
        );
    }

    #[test]
    fn test_installment_round_trip() {
        let installment = AmortizationInstallment {
            number: 1,
            due_date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            principal: dec("3051.03"),
            interest: dec("2500.00"),
            interest_tax: dec("250.00"),
            insurance: dec("0"),
            total_payment: dec("5801.03"),
            remaining_principal: dec("496948.97"),
        };

        let json = serde_json::to_string(&installment).unwrap();
        let round_tripped: AmortizationInstallment = serde_json::from_str(&json).unwrap();
        assert_eq!(installment, round_tripped);
    }
}
