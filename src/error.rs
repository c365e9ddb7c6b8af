//! Error types for the payroll and credit computation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions the engine can signal. The engine never logs
//! and never swallows a validation failure; it returns the specific variant
//! so the caller can present a precise message.

use thiserror::Error;

/// The main error type for the payroll and credit computation engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tax.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tax.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A jurisdiction table (tax brackets, contribution lines, seniority
    /// bands) is empty, unordered, or has gaps. Such a table must fail fast
    /// rather than silently resolve to zero tax or zero contributions.
    #[error("Invalid jurisdiction configuration in {table}: {message}")]
    Configuration {
        /// The table that failed validation (e.g., "tax.brackets").
        table: String,
        /// A description of what made the table invalid.
        message: String,
    },

    /// An input value was negative, out of range, or otherwise unusable.
    /// No partial result is produced.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was rejected.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A loan with valid-looking inputs resolved to a monthly payment that
    /// cannot amortize anything (zero or negative).
    #[error("Degenerate loan: {message}")]
    DegenerateLoan {
        /// A description of the degenerate condition.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
