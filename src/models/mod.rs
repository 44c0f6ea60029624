//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod contribution_rule;
mod employee;
mod payroll_record;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, ContributionAmounts, Deduction, DeductionCategory,
    PayrollBreakdown, PayrollCalculationResult,
};
pub use contribution_rule::{ContributionKind, ContributionRule};
pub use employee::{Employee, MAX_MONETARY_AMOUNT};
pub use payroll_record::{NewPayrollRecord, PayrollRecord, PayrollStatus, PeriodKey};

#[cfg(test)]
pub(crate) use payroll_record::tests::sample_new_record;
