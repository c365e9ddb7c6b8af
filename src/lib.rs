//! Payroll & Credit Computation Engine
//!
//! This crate provides the pure computation core of a payroll administration
//! system: itemized gross/net payslips under configurable statutory regimes
//! (progressive tax brackets, capped contributions, reliefs), loan
//! amortization schedules, and point-in-time repayment-progress assessment.
//! All functions are synchronous and side-effect-free; persistence, document
//! rendering, and transport are collaborator concerns.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
