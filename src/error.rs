//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing and recording payroll.

use thiserror::Error;

use crate::models::PayrollStatus;

/// The main error type for the Payroll Engine.
///
/// All fallible operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. A missing
/// contribution rule is deliberately absent: the computation degrades to a zero
/// contribution instead of failing.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: 5,
///     company_id: 1,
/// };
/// assert_eq!(error.to_string(), "Employee 5 not found in company 1");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The employee does not exist within the requesting company's scope.
    #[error("Employee {employee_id} not found in company {company_id}")]
    EmployeeNotFound {
        /// The requested employee identifier.
        employee_id: u64,
        /// The company the lookup was scoped to.
        company_id: u64,
    },

    /// The payroll record does not exist within the requesting company's scope.
    #[error("Payroll {payroll_id} not found in company {company_id}")]
    PayrollNotFound {
        /// The requested payroll identifier.
        payroll_id: u64,
        /// The company the lookup was scoped to.
        company_id: u64,
    },

    /// A payroll record already exists for the period key.
    #[error(
        "Payroll already exists for employee {employee_id} in company {company_id} for {year}-{month:02}"
    )]
    DuplicatePeriod {
        /// The owning company.
        company_id: u64,
        /// The employee the payroll belongs to.
        employee_id: u64,
        /// The period year.
        year: i32,
        /// The period month (1-12).
        month: u32,
    },

    /// Approval was requested on a record that is not a draft.
    #[error("Payroll {payroll_id} cannot be approved from status {status}")]
    InvalidApprovalState {
        /// The payroll identifier.
        payroll_id: u64,
        /// The status the record was found in.
        status: PayrollStatus,
    },

    /// A request field violated one of the engine's preconditions.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

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

    /// The storage backend failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Builds an [`EngineError::InvalidRequest`] for the given field.
    pub fn invalid_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
