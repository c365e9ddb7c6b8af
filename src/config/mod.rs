//! Jurisdiction configuration for the payroll and credit engine.
//!
//! Both statutory regimes shipped with the crate (Kenya-style and
//! Morocco-style) are plain data: one generic engine parameterized by a
//! [`JurisdictionConfig`] loaded from YAML files.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionCategory, ContributionLine, ContributionsConfig, CreditRules, JurisdictionConfig,
    JurisdictionMetadata, PayrollRules, SeniorityBand, TaxBracket, TaxTable,
};
