//! Payroll record lifecycle: preview, create, approve and query.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::calculation::{calculate_payroll, round_currency};
use crate::config::PayrollSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ContributionRule, Employee, NewPayrollRecord, PayrollCalculationResult, PayrollRecord, PayrollStatus, PeriodKey,
};
use crate::store::{
    EmployeeDirectory, InsertOutcome, PayrollLedger, PayrollStore, StatusTransition,
};

use super::request::{CalculatePayrollRequest, CreatePayrollRequest};

/// Orchestrates payroll calculations against a store.
///
/// Every operation is scoped to an explicit `company_id`. The service holds
/// no state between calls apart from the shared store handle.
#[derive(Clone)]
pub struct PayrollService {
    store: Arc<dyn PayrollStore>,
    settings: PayrollSettings,
}

impl PayrollService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn PayrollStore>, settings: PayrollSettings) -> Self {
        Self { store, settings }
    }

    /// Returns the payroll settings in effect.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    async fn load_employee(&self, employee_id: u64, company_id: u64) -> EngineResult<Employee> {
        let employee = self
            .store
            .find_employee(employee_id, company_id)
            .await?
            .ok_or(EngineError::EmployeeNotFound {
                employee_id,
                company_id,
            })?;
        employee.validate()?;
        Ok(employee)
    }

    async fn load_rules(&self, company_id: u64) -> EngineResult<Vec<ContributionRule>> {
        let rules = self.store.active_rules(company_id).await?;
        for rule in &rules {
            rule.validate()?;
        }
        Ok(rules)
    }

    fn default_payment_date(&self, now: DateTime<Utc>) -> EngineResult<DateTime<Utc>> {
        let delay_days = self.settings.payment_delay_days;
        Duration::try_days(delay_days)
            .and_then(|delay| now.checked_add_signed(delay))
            .ok_or_else(|| {
                EngineError::invalid_request(
                    "payment_date",
                    format!(
                        "default of {} days after {} is out of range; supply a payment date",
                        delay_days, now
                    ),
                )
            })
    }

    /// Computes a payroll for a stored employee without persisting anything.
    pub async fn calculate(
        &self,
        request: &CalculatePayrollRequest,
        company_id: u64,
    ) -> EngineResult<PayrollCalculationResult> {
        request.validate()?;

        let employee = self.load_employee(request.employee_id, company_id).await?;
        let rules = self.load_rules(company_id).await?;

        Ok(calculate_payroll(
            &employee,
            request.worked_days,
            request.total_allowances,
            request.other_deductions,
            &rules,
        ))
    }

    /// Creates a draft payroll record, timestamped now.
    ///
    /// See [`create_payroll_record_at`](Self::create_payroll_record_at).
    pub async fn create_payroll_record(
        &self,
        request: &CreatePayrollRequest,
        company_id: u64,
    ) -> EngineResult<PayrollRecord> {
        self.create_payroll_record_at(request, company_id, Utc::now())
            .await
    }

    /// Creates a draft payroll record as of `now`.
    ///
    /// Fails with [`EngineError::DuplicatePeriod`] if a record already exists
    /// for the employee and month; the existing record is never touched.
    /// Monetary fields are stored rounded to cents.
    pub async fn create_payroll_record_at(
        &self,
        request: &CreatePayrollRequest,
        company_id: u64,
        now: DateTime<Utc>,
    ) -> EngineResult<PayrollRecord> {
        request.validate(&self.settings)?;

        let employee = self.load_employee(request.employee_id, company_id).await?;
        let rules = self.load_rules(company_id).await?;

        let result = calculate_payroll(
            &employee,
            request.worked_days,
            request.total_allowances,
            request.other_deductions,
            &rules,
        );

        let period = PeriodKey {
            company_id,
            employee_id: request.employee_id,
            year: request.period_year,
            month: request.period_month,
        };
        let payment_date = match request.payment_date {
            Some(date) => date,
            None => self.default_payment_date(now)?,
        };

        let record = build_record(period, &result, request, payment_date, now);

        match self.store.insert_if_absent(record).await? {
            InsertOutcome::Inserted(stored) => {
                info!(
                    payroll_id = stored.id,
                    company_id,
                    employee_id = stored.employee_id,
                    year = stored.period_year,
                    month = stored.period_month,
                    net_salary = %stored.net_salary,
                    "Payroll record created"
                );
                Ok(stored)
            }
            InsertOutcome::Conflict { existing_id } => {
                warn!(
                    existing_id,
                    company_id,
                    employee_id = period.employee_id,
                    year = period.year,
                    month = period.month,
                    "Payroll already exists for period"
                );
                Err(EngineError::DuplicatePeriod {
                    company_id,
                    employee_id: period.employee_id,
                    year: period.year,
                    month: period.month,
                })
            }
        }
    }

    /// Approves a draft payroll record.
    pub async fn approve(&self, payroll_id: u64, company_id: u64) -> EngineResult<PayrollRecord> {
        self.approve_at(payroll_id, company_id, Utc::now()).await
    }

    /// Approves a draft payroll record as of `now`.
    ///
    /// Only `Draft -> Approved` is allowed. Any other current status yields
    /// [`EngineError::InvalidApprovalState`] and leaves the record unchanged.
    pub async fn approve_at(
        &self,
        payroll_id: u64,
        company_id: u64,
        now: DateTime<Utc>,
    ) -> EngineResult<PayrollRecord> {
        let transition = self
            .store
            .transition_status(
                payroll_id,
                company_id,
                PayrollStatus::Draft,
                PayrollStatus::Approved,
                now,
            )
            .await?;

        match transition {
            StatusTransition::Updated(record) => {
                info!(payroll_id, company_id, "Payroll approved");
                Ok(record)
            }
            StatusTransition::NotFound => Err(EngineError::PayrollNotFound {
                payroll_id,
                company_id,
            }),
            StatusTransition::Mismatch(status) => {
                debug!(payroll_id, company_id, %status, "Approval rejected");
                Err(EngineError::InvalidApprovalState { payroll_id, status })
            }
        }
    }

    /// Fetches a payroll record.
    pub async fn get_payroll(&self, payroll_id: u64, company_id: u64) -> EngineResult<PayrollRecord> {
        self.store
            .find_payroll(payroll_id, company_id)
            .await?
            .ok_or(EngineError::PayrollNotFound {
                payroll_id,
                company_id,
            })
    }

    /// Lists a company's payroll records, newest period first.
    pub async fn list_payrolls(
        &self,
        company_id: u64,
        year: Option<i32>,
        month: Option<u32>,
    ) -> EngineResult<Vec<PayrollRecord>> {
        self.store.list_payrolls(company_id, year, month).await
    }
}

/// Projects a calculation onto a storable record with cent-rounded amounts.
fn build_record(
    period: PeriodKey,
    result: &PayrollCalculationResult,
    request: &CreatePayrollRequest,
    payment_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> NewPayrollRecord {
    NewPayrollRecord {
        period,
        worked_days: request.worked_days,
        gross_salary: round_currency(result.gross_salary),
        net_salary: round_currency(result.net_salary),
        total_deductions: round_currency(result.total_deductions),
        total_allowances: round_currency(request.total_allowances),
        social_security_employee: round_currency(result.social_security.employee),
        social_security_employer: round_currency(result.social_security.employer),
        health_insurance_employee: round_currency(result.health_insurance.employee),
        health_insurance_employer: round_currency(result.health_insurance.employer),
        income_tax: round_currency(result.income_tax),
        other_deductions: round_currency(request.other_deductions),
        payment_date,
        status: PayrollStatus::Draft,
        created_at: now,
    }
}
