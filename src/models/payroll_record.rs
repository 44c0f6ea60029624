//! Persisted payroll record models.
//!
//! A [`PayrollRecord`] is the stored projection of a calculation for one
//! employee and one calendar month. Exactly one record may exist per
//! [`PeriodKey`].

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a payroll record.
///
/// The engine creates records as `Draft` and performs the single
/// `Draft -> Approved` transition. `Paid` and `Cancelled` are set by the
/// wider system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Freshly computed, awaiting approval.
    Draft,
    /// Approved for payment.
    Approved,
    /// Paid out.
    Paid,
    /// Cancelled.
    Cancelled,
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayrollStatus::Draft => "draft",
            PayrollStatus::Approved => "approved",
            PayrollStatus::Paid => "paid",
            PayrollStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// The uniqueness key of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    /// The owning company.
    pub company_id: u64,
    /// The employee.
    pub employee_id: u64,
    /// The period year.
    pub year: i32,
    /// The period month (1-12).
    pub month: u32,
}

/// A payroll record that has not been stored yet.
///
/// Stores assign the identifier on insert, see
/// [`PayrollLedger::insert_if_absent`](crate::store::PayrollLedger::insert_if_absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayrollRecord {
    /// The period key the record is unique on.
    pub period: PeriodKey,
    /// Days worked in the period.
    pub worked_days: u32,
    /// Gross salary (pro-rated base plus allowances).
    pub gross_salary: Decimal,
    /// Net salary after all deductions. May be negative.
    pub net_salary: Decimal,
    /// Sum of all employee-side deductions.
    pub total_deductions: Decimal,
    /// Allowances paid on top of the pro-rated base.
    pub total_allowances: Decimal,
    /// Employee-side social security contribution.
    pub social_security_employee: Decimal,
    /// Employer-side social security contribution.
    pub social_security_employer: Decimal,
    /// Employee-side health insurance contribution.
    pub health_insurance_employee: Decimal,
    /// Employer-side health insurance contribution.
    pub health_insurance_employer: Decimal,
    /// Income tax withheld.
    pub income_tax: Decimal,
    /// Other deductions supplied by the caller.
    pub other_deductions: Decimal,
    /// Scheduled payment date.
    pub payment_date: DateTime<Utc>,
    /// Status at creation time.
    pub status: PayrollStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A stored payroll record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier assigned by the store.
    pub id: u64,
    /// The owning company.
    pub company_id: u64,
    /// The employee.
    pub employee_id: u64,
    /// The period year.
    pub period_year: i32,
    /// The period month (1-12).
    pub period_month: u32,
    /// Days worked in the period.
    pub worked_days: u32,
    /// Gross salary.
    pub gross_salary: Decimal,
    /// Net salary.
    pub net_salary: Decimal,
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Total allowances.
    pub total_allowances: Decimal,
    /// Employee-side social security contribution.
    pub social_security_employee: Decimal,
    /// Employer-side social security contribution.
    pub social_security_employer: Decimal,
    /// Employee-side health insurance contribution.
    pub health_insurance_employee: Decimal,
    /// Employer-side health insurance contribution.
    pub health_insurance_employer: Decimal,
    /// Income tax withheld.
    pub income_tax: Decimal,
    /// Other deductions.
    pub other_deductions: Decimal,
    /// Scheduled payment date.
    pub payment_date: DateTime<Utc>,
    /// Current lifecycle status.
    pub status: PayrollStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Materialises a stored record from a new record and its assigned id.
    pub fn from_new(id: u64, new: NewPayrollRecord) -> Self {
        Self {
            id,
            company_id: new.period.company_id,
            employee_id: new.period.employee_id,
            period_year: new.period.year,
            period_month: new.period.month,
            worked_days: new.worked_days,
            gross_salary: new.gross_salary,
            net_salary: new.net_salary,
            total_deductions: new.total_deductions,
            total_allowances: new.total_allowances,
            social_security_employee: new.social_security_employee,
            social_security_employer: new.social_security_employer,
            health_insurance_employee: new.health_insurance_employee,
            health_insurance_employer: new.health_insurance_employer,
            income_tax: new.income_tax,
            other_deductions: new.other_deductions,
            payment_date: new.payment_date,
            status: new.status,
            created_at: new.created_at,
            updated_at: new.created_at,
        }
    }

    /// Returns the period key of this record.
    pub fn period_key(&self) -> PeriodKey {
        PeriodKey {
            company_id: self.company_id,
            employee_id: self.employee_id,
            year: self.period_year,
            month: self.period_month,
        }
    }
}
