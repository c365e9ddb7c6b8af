//! Core data models for the payroll and credit engine.
//!
//! This module contains all the plain-data inputs and outputs exchanged
//! with collaborators.

mod employee;
mod inputs;
mod loan;
mod payroll_result;

pub use employee::{EmployeeCompensationProfile, MaritalStatus};
pub use inputs::{ElementKind, PayrollInputs, VariableElement};
pub use loan::{AmortizationInstallment, CreditProgressSnapshot, LoanContract, LoanStatus};
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, ContributionAmount, ContributionSet, DeductionCategory,
    DeductionLine, PayrollResult, TaxComputation,
};
