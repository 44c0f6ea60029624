//! Employee model.
//!
//! The engine only reads employees; it never creates or mutates them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest monetary amount the engine accepts as input: one trillion.
///
/// Salaries, allowances, deductions and contribution caps above this are
/// rejected during validation, which keeps every intermediate product of a
/// calculation well inside `Decimal` range.
pub const MAX_MONETARY_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

fn default_active() -> bool {
    true
}

/// Represents an employee of a tenant company.
///
/// `base_salary` is the full monthly salary before pro-ration and must lie
/// between zero and [`MAX_MONETARY_AMOUNT`]. Callers are responsible for upholding that invariant; see
/// [`Employee::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: u64,
    /// The company the employee belongs to.
    pub company_id: u64,
    /// Company-assigned employee number (e.g., "EMP001").
    #[serde(default)]
    pub employee_number: String,
    /// Base monthly salary.
    pub base_salary: Decimal,
    /// Whether the employee is currently active.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Employee {
    /// Checks the employee invariants the calculation relies on.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: 5,
    ///     company_id: 1,
    ///     employee_number: "EMP005".to_string(),
    ///     base_salary: Decimal::new(-100, 0),
    ///     is_active: true,
    /// };
    /// assert!(employee.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.base_salary < Decimal::ZERO {
            return Err(EngineError::invalid_request(
                "base_salary",
                format!("must not be negative (got {})", self.base_salary),
            ));
        }
        if self.base_salary > MAX_MONETARY_AMOUNT {
            return Err(EngineError::invalid_request(
                "base_salary",
                format!(
                    "must not exceed {} (got {})",
                    MAX_MONETARY_AMOUNT, self.base_salary
                ),
            ));
        }
        Ok(())
    }
}
