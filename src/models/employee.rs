//! Employee compensation profile and related types.
//!
//! This module defines the immutable input snapshot the payroll calculator
//! works from. The engine never mutates a profile; each calculation call
//! receives a fresh snapshot assembled by the caller.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ContributionCategory;

/// Marital status of the employee.
///
/// Carried for document-rendering collaborators; neither shipped regime
/// derives a computational effect from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    /// Single.
    Single,
    /// Married.
    Married,
    /// Divorced.
    Divorced,
    /// Widowed.
    Widowed,
}

/// An employee's compensation snapshot for one payroll period.
///
/// All monetary fields are monthly amounts in the jurisdiction currency.
/// Loan/advance installments and period variable elements are not part of
/// the profile; they arrive separately as already-resolved numbers (the
/// caller filters active records for the correct employee and period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeCompensationProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// Monthly base salary before any bonus or allowance.
    pub base_salary: Decimal,
    /// Fixed monthly housing allowance.
    #[serde(default)]
    pub housing_allowance: Decimal,
    /// Fixed monthly meal allowance.
    #[serde(default)]
    pub meal_allowance: Decimal,
    /// Fixed monthly transport allowance (may be tax-exempt per regime).
    #[serde(default)]
    pub transport_allowance: Decimal,
    /// Fixed monthly representation allowance.
    #[serde(default)]
    pub representation_allowance: Decimal,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// Marital status.
    pub marital_status: MaritalStatus,
    /// Number of declared dependents.
    #[serde(default)]
    pub dependents: u32,
    /// Whether the employee is subject to social security contributions.
    pub subject_to_social_security: bool,
    /// Whether the employee is subject to health contributions.
    pub subject_to_health: bool,
    /// Whether the employee is subject to the housing levy.
    pub subject_to_housing_levy: bool,
    /// Optional elective monthly insurance premium, withheld from net pay.
    #[serde(default)]
    pub insurance_premium: Option<Decimal>,
}

impl EmployeeCompensationProfile {
    /// Sum of the fixed monthly allowances.
    pub fn total_allowances(&self) -> Decimal {
        self.housing_allowance
            + self.meal_allowance
            + self.transport_allowance
            + self.representation_allowance
    }

    /// Whether the employee is subject to the contribution category.
    ///
    /// Employer-only categories (family allowance, training levy) and the
    /// catch-all `Other` are always subject; the three opt-out flags only
    /// cover the categories the profile carries flags for.
    pub fn is_subject_to(&self, category: ContributionCategory) -> bool {
        match category {
            ContributionCategory::SocialSecurity => self.subject_to_social_security,
            ContributionCategory::Health => self.subject_to_health,
            ContributionCategory::HousingLevy => self.subject_to_housing_levy,
            ContributionCategory::FamilyAllowance
            | ContributionCategory::TrainingLevy
            | ContributionCategory::Other => true,
        }
    }
}
