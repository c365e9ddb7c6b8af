//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading jurisdiction
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ContributionsConfig, CreditRules, JurisdictionConfig, JurisdictionMetadata, PayrollRules,
    TaxTable,
};

/// Loads and provides access to a jurisdiction configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every table, and exposes the resulting [`JurisdictionConfig`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/kenya/
/// ├── jurisdiction.yaml   # Jurisdiction metadata
/// ├── tax.yaml            # Progressive brackets and reliefs
/// ├── contributions.yaml  # Employee and employer contribution lines
/// ├── payroll.yaml        # Seniority bands and payroll rules
/// └── credit.yaml         # Interest tax and delinquency rules
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/kenya").unwrap();
/// println!("Loaded regime: {}", loader.metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: JurisdictionConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/kenya")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - Any table fails validation (`Configuration`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payslip_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/morocco")?;
    /// # Ok::<(), payslip_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;
        let tax = Self::load_yaml::<TaxTable>(&path.join("tax.yaml"))?;
        let contributions = Self::load_yaml::<ContributionsConfig>(&path.join("contributions.yaml"))?;
        let payroll = Self::load_yaml::<PayrollRules>(&path.join("payroll.yaml"))?;
        let credit = Self::load_yaml::<CreditRules>(&path.join("credit.yaml"))?;

        let config = JurisdictionConfig::new(metadata, tax, contributions, payroll, credit)?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying jurisdiction configuration.
    pub fn config(&self) -> &JurisdictionConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        self.config.metadata()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContributionCategory;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_kenya_configuration() {
        let result = ConfigLoader::load("./config/kenya");
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().code, "KE");
        assert_eq!(loader.metadata().currency, "KES");
    }

    #[test]
    fn test_load_morocco_configuration() {
        let result = ConfigLoader::load("./config/morocco");
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().code, "MA");
        assert_eq!(loader.metadata().currency, "MAD");
    }

    #[test]
    fn test_kenya_brackets_loaded_in_order() {
        let loader = ConfigLoader::load("./config/kenya").unwrap();
        let brackets = &loader.config().tax().brackets;

        assert_eq!(brackets[0].lower, dec("0"));
        assert_eq!(brackets[0].upper, Some(dec("24000")));
        assert_eq!(brackets[0].rate, dec("0.10"));
        assert!(brackets.last().unwrap().upper.is_none());
    }

    #[test]
    fn test_kenya_personal_relief_loaded() {
        let loader = ConfigLoader::load("./config/kenya").unwrap();
        assert_eq!(loader.config().tax().personal_relief, dec("2400"));
    }

    #[test]
    fn test_kenya_contribution_lines_loaded() {
        let loader = ConfigLoader::load("./config/kenya").unwrap();
        let contributions = loader.config().contributions();

        let nssf = contributions
            .employee
            .iter()
            .find(|l| l.code == "nssf")
            .expect("nssf line missing");
        assert_eq!(nssf.category, ContributionCategory::SocialSecurity);
        assert_eq!(nssf.rate, dec("0.06"));
        assert_eq!(nssf.cap, Some(dec("36000")));
    }

    #[test]
    fn test_morocco_employer_table_richer_than_employee_table() {
        let loader = ConfigLoader::load("./config/morocco").unwrap();
        let contributions = loader.config().contributions();

        // Employer pays family allowance and training levy with no
        // employee-side equivalent.
        assert!(contributions.employer.len() > contributions.employee.len());
        assert!(
            contributions
                .employer
                .iter()
                .any(|l| l.category == ContributionCategory::FamilyAllowance)
        );
        assert!(
            contributions
                .employer
                .iter()
                .any(|l| l.category == ContributionCategory::TrainingLevy)
        );
    }

    #[test]
    fn test_morocco_seniority_bands_cover_from_zero() {
        let loader = ConfigLoader::load("./config/morocco").unwrap();
        let bands = &loader.config().payroll_rules().seniority_bands;

        assert_eq!(bands[0].min_years, 0);
        assert!(bands.last().unwrap().max_years.is_none());
    }

    #[test]
    fn test_credit_rules_loaded_with_threshold() {
        let loader = ConfigLoader::load("./config/kenya").unwrap();
        let credit = loader.config().credit_rules();

        assert_eq!(credit.delinquency_threshold_months, 3);
        assert_eq!(credit.max_term_months, 600);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("jurisdiction.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
