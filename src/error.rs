//! Error types for the deduction administration service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing deductions,
//! employees, and bulk imports.

use thiserror::Error;

/// The main error type for the deduction administration service.
///
/// All operations in the service return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use deduction_admin::error::AdminError;
///
/// let error = AdminError::DuplicatePayrollCode {
///     code: "MED-BCBS-01".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "The payroll code \"MED-BCBS-01\" is already in use by another deduction"
/// );
/// ```
#[derive(Debug, Error)]
pub enum AdminError {
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

    /// Category id or label is not part of the catalog.
    #[error("Unknown deduction category: {category}")]
    UnknownCategory {
        /// The category that was not recognised.
        category: String,
    },

    /// Subtype does not belong to the chosen category.
    #[error("Plan type '{subtype}' is not offered for category {category}")]
    UnknownSubtype {
        /// The category id.
        category: String,
        /// The rejected subtype.
        subtype: String,
    },

    /// No deduction with the given id exists.
    #[error("Deduction not found: {id}")]
    DeductionNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// Another deduction already uses this payroll code.
    #[error("The payroll code \"{code}\" is already in use by another deduction")]
    DuplicatePayrollCode {
        /// The conflicting payroll code.
        code: String,
    },

    /// A deduction record was incomplete or contained inconsistent data.
    #[error("Invalid deduction field '{field}': {message}")]
    InvalidDeduction {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No employee with the given id exists.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The employee has no enrollment for the requested plan.
    #[error("Employee '{employee_id}' has no enrollment named '{plan}'")]
    EnrollmentNotFound {
        /// The employee id.
        employee_id: String,
        /// The plan name that was looked up.
        plan: String,
    },

    /// A request was well-formed JSON but semantically unusable.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// A description of the problem.
        message: String,
    },

    /// The extraction model is not configured (no API key).
    #[error("Extraction service unavailable: {message}")]
    ExtractionUnavailable {
        /// Why the service cannot be used.
        message: String,
    },

    /// The call to the extraction model failed.
    #[error("Extraction request failed: {message}")]
    ExtractionFailed {
        /// A description of the transport or HTTP failure.
        message: String,
    },
}

/// A type alias for Results that return AdminError.
pub type AdminResult<T> = Result<T, AdminError>;
