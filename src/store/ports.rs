//! Storage ports consumed by the payroll service.
//!
//! Every method takes the company identifier explicitly; stores must never
//! return data belonging to another company.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::EngineResult;
use crate::models::{
    ContributionRule, Employee, NewPayrollRecord, PayrollRecord, PayrollStatus,
};

/// Outcome of a conditional insert.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// The record was stored under a freshly assigned id.
    Inserted(PayrollRecord),
    /// A record already exists for the period key; nothing was written.
    Conflict {
        /// Identifier of the record holding the period key.
        existing_id: u64,
    },
}

/// Outcome of a compare-and-set status transition.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusTransition {
    /// The status was changed; carries the updated record.
    Updated(PayrollRecord),
    /// No record with that id exists in the company.
    NotFound,
    /// The record exists but was not in the expected status. Nothing changed.
    Mismatch(PayrollStatus),
}

/// Read access to employees and contribution rules.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up an employee within a company.
    async fn find_employee(&self, employee_id: u64, company_id: u64) -> EngineResult<Option<Employee>>;

    /// Returns the company's active contribution rules in ascending id order.
    async fn active_rules(&self, company_id: u64) -> EngineResult<Vec<ContributionRule>>;
}

/// Read/write access to payroll records.
#[async_trait]
pub trait PayrollLedger: Send + Sync {
    /// Inserts the record if and only if no record exists for its period key.
    ///
    /// The existence check and the insert must be atomic with respect to
    /// concurrent callers.
    async fn insert_if_absent(&self, record: NewPayrollRecord) -> EngineResult<InsertOutcome>;

    /// Looks up a payroll record within a company.
    async fn find_payroll(&self, payroll_id: u64, company_id: u64) -> EngineResult<Option<PayrollRecord>>;

    /// Moves a record from `from` to `to` if it is currently in `from`.
    async fn transition_status(
        &self,
        payroll_id: u64,
        company_id: u64,
        from: PayrollStatus,
        to: PayrollStatus,
        at: DateTime<Utc>,
    ) -> EngineResult<StatusTransition>;

    /// Lists a company's payroll records, optionally filtered by period.
    ///
    /// Ordered by year descending, month descending, then employee id.
    async fn list_payrolls(
        &self,
        company_id: u64,
        year: Option<i32>,
        month: Option<u32>,
    ) -> EngineResult<Vec<PayrollRecord>>;
}

/// A store providing both ports.
pub trait PayrollStore: EmployeeDirectory + PayrollLedger {}

impl<T: EmployeeDirectory + PayrollLedger> PayrollStore for T {}
