//! Calculation result models for the Payroll Engine.
//!
//! This module contains the [`PayrollCalculationResult`] type and its associated
//! structures that capture all outputs from a payroll calculation, including the
//! deduction breakdown handed to payslip rendering and the audit trace.
//!
//! Results are plain data: no identity, no persistence.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The category of a deduction line.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DeductionCategory;
///
/// let category = DeductionCategory::Social;
/// assert_eq!(format!("{:?}", category), "Social");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionCategory {
    /// Statutory social contributions (social security, health insurance).
    Social,
    /// Income tax.
    Tax,
    /// Caller-supplied deductions (loans, advances, ...).
    Other,
}

/// A single deduction line in the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Display name of the deduction.
    pub name: String,
    /// The amount withheld from the employee.
    pub amount: Decimal,
    /// The deduction category.
    pub category: DeductionCategory,
}

/// Employee- and employer-side amounts of one contribution kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContributionAmounts {
    /// Amount withheld from the employee.
    pub employee: Decimal,
    /// Amount owed by the employer.
    pub employer: Decimal,
}

/// The itemised breakdown of a payroll calculation.
///
/// Deductions always appear in the fixed order social security, health
/// insurance, income tax, other deductions.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Deduction, DeductionCategory, PayrollBreakdown};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let breakdown = PayrollBreakdown {
///     base_salary: Decimal::from_str("3000").unwrap(),
///     allowances: Decimal::ZERO,
///     gross_salary: Decimal::from_str("3000").unwrap(),
///     deductions: vec![Deduction {
///         name: "Income Tax".to_string(),
///         amount: Decimal::from_str("50").unwrap(),
///         category: DeductionCategory::Tax,
///     }],
///     total_deductions: Decimal::from_str("50").unwrap(),
///     net_salary: Decimal::from_str("2950").unwrap(),
/// };
/// assert_eq!(breakdown.gross_salary - breakdown.total_deductions, breakdown.net_salary);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// Base salary pro-rated for the days worked.
    pub base_salary: Decimal,
    /// Allowances added on top of the base.
    pub allowances: Decimal,
    /// Gross salary.
    pub gross_salary: Decimal,
    /// Ordered deduction lines.
    pub deductions: Vec<Deduction>,
    /// Sum of all deduction lines.
    pub total_deductions: Decimal,
    /// Net salary.
    pub net_salary: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// The complete result of a payroll calculation.
///
/// Carries the headline amounts, the per-kind contribution amounts, the
/// breakdown consumed by payslip rendering, and the audit trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculationResult {
    /// The employee the calculation is for.
    pub employee_id: u64,
    /// Days worked in the period.
    pub worked_days: u32,
    /// Gross salary.
    pub gross_salary: Decimal,
    /// Net salary. Not floored at zero.
    pub net_salary: Decimal,
    /// Sum of all employee-side deductions.
    pub total_deductions: Decimal,
    /// Social security contribution amounts.
    pub social_security: ContributionAmounts,
    /// Health insurance contribution amounts.
    pub health_insurance: ContributionAmounts,
    /// Income tax withheld.
    pub income_tax: Decimal,
    /// Itemised breakdown.
    pub breakdown: PayrollBreakdown,
    /// Audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
