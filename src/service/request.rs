//! Request types accepted by [`PayrollService`](super::PayrollService).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::MAX_MONETARY_AMOUNT;

/// Highest accepted worked-days value. Months never exceed 31 days.
pub const MAX_WORKED_DAYS: u32 = 31;

/// Request to compute a payroll preview for a stored employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatePayrollRequest {
    /// The employee to calculate for.
    pub employee_id: u64,
    /// Days worked in the period (1-31).
    pub worked_days: u32,
    /// Allowances added to the pro-rated base.
    #[serde(default)]
    pub total_allowances: Decimal,
    /// Deductions on top of the statutory ones.
    #[serde(default)]
    pub other_deductions: Decimal,
}

impl CalculatePayrollRequest {
    /// Checks the amount and worked-days preconditions.
    pub fn validate(&self) -> EngineResult<()> {
        validate_amounts(self.worked_days, self.total_allowances, self.other_deductions)
    }
}

/// Request to create a payroll record for one employee and month.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollSettings;
/// use payroll_engine::service::CreatePayrollRequest;
/// use rust_decimal::Decimal;
///
/// let request = CreatePayrollRequest {
///     employee_id: 5,
///     period_year: 2025,
///     period_month: 13,
///     worked_days: 30,
///     total_allowances: Decimal::ZERO,
///     other_deductions: Decimal::ZERO,
///     payment_date: None,
/// };
/// assert!(request.validate(&PayrollSettings::default()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePayrollRequest {
    /// The employee the record is for.
    pub employee_id: u64,
    /// Period year.
    pub period_year: i32,
    /// Period month (1-12).
    pub period_month: u32,
    /// Days worked in the period (1-31).
    pub worked_days: u32,
    /// Allowances added to the pro-rated base.
    #[serde(default)]
    pub total_allowances: Decimal,
    /// Deductions on top of the statutory ones.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Scheduled payment date. Defaults to creation time plus the configured delay.
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,
}

impl CreatePayrollRequest {
    /// Checks every field against the configured bounds.
    pub fn validate(&self, settings: &PayrollSettings) -> EngineResult<()> {
        if !(settings.min_period_year..=settings.max_period_year).contains(&self.period_year) {
            return Err(EngineError::invalid_request(
                "period_year",
                format!(
                    "must be between {} and {} (got {})",
                    settings.min_period_year, settings.max_period_year, self.period_year
                ),
            ));
        }
        if !(1..=12).contains(&self.period_month) {
            return Err(EngineError::invalid_request(
                "period_month",
                format!("must be between 1 and 12 (got {})", self.period_month),
            ));
        }
        validate_amounts(self.worked_days, self.total_allowances, self.other_deductions)
    }
}

fn validate_amounts(
    worked_days: u32,
    allowances: Decimal,
    other_deductions: Decimal,
) -> EngineResult<()> {
    if !(1..=MAX_WORKED_DAYS).contains(&worked_days) {
        return Err(EngineError::invalid_request(
            "worked_days",
            format!("must be between 1 and {} (got {})", MAX_WORKED_DAYS, worked_days),
        ));
    }
    for (field, amount) in [
        ("total_allowances", allowances),
        ("other_deductions", other_deductions),
    ] {
        if amount < Decimal::ZERO {
            return Err(EngineError::invalid_request(
                field,
                format!("must not be negative (got {})", amount),
            ));
        }
        if amount > MAX_MONETARY_AMOUNT {
            return Err(EngineError::invalid_request(
                field,
                format!("must not exceed {} (got {})", MAX_MONETARY_AMOUNT, amount),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_request() -> CreatePayrollRequest {
        CreatePayrollRequest {
            employee_id: 5,
            period_year: 2025,
            period_month: 3,
            worked_days: 30,
            total_allowances: dec!(500),
            other_deductions: dec!(0),
            payment_date: None,
        }
    }

    fn rejected_field(request: &CreatePayrollRequest) -> String {
        match request.validate(&PayrollSettings::default()) {
            Err(EngineError::InvalidRequest { field, .. }) => field,
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate(&PayrollSettings::default()).is_ok());
    }

    #[test]
    fn test_year_bounds_are_inclusive() {
        let settings = PayrollSettings::default();
        let mut request = valid_request();

        request.period_year = 2000;
        assert!(request.validate(&settings).is_ok());
        request.period_year = 3000;
        assert!(request.validate(&settings).is_ok());
        request.period_year = 1999;
        assert_eq!(rejected_field(&request), "period_year");
    }

    #[test]
    fn test_month_out_of_range() {
        let mut request = valid_request();
        request.period_month = 0;
        assert_eq!(rejected_field(&request), "period_month");
        request.period_month = 13;
        assert_eq!(rejected_field(&request), "period_month");
    }

    #[test]
    fn test_worked_days_out_of_range() {
        let mut request = valid_request();
        request.worked_days = 0;
        assert_eq!(rejected_field(&request), "worked_days");
        request.worked_days = 32;
        assert_eq!(rejected_field(&request), "worked_days");
        request.worked_days = 31;
        assert!(request.validate(&PayrollSettings::default()).is_ok());
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let mut request = valid_request();
        request.total_allowances = dec!(-0.01);
        assert_eq!(rejected_field(&request), "total_allowances");

        let mut request = valid_request();
        request.other_deductions = dec!(-1);
        assert_eq!(rejected_field(&request), "other_deductions");
    }

    #[test]
    fn test_amounts_above_ceiling_rejected() {
        let mut request = valid_request();
        request.total_allowances = MAX_MONETARY_AMOUNT;
        assert!(request.validate(&PayrollSettings::default()).is_ok());

        request.total_allowances = Decimal::MAX;
        assert_eq!(rejected_field(&request), "total_allowances");

        let mut request = valid_request();
        request.other_deductions = MAX_MONETARY_AMOUNT + dec!(0.01);
        assert_eq!(rejected_field(&request), "other_deductions");
    }

    #[test]
    fn test_optional_fields_default() {
        let request: CreatePayrollRequest = serde_json::from_str(
            r#"{"employee_id": 5, "period_year": 2025, "period_month": 3, "worked_days": 30}"#,
        )
        .unwrap();
        assert_eq!(request.total_allowances, Decimal::ZERO);
        assert_eq!(request.other_deductions, Decimal::ZERO);
        assert!(request.payment_date.is_none());
    }

    #[test]
    fn test_calculate_request_validation() {
        let request = CalculatePayrollRequest {
            employee_id: 1,
            worked_days: 0,
            total_allowances: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
        };
        assert!(matches!(
            request.validate(),
            Err(EngineError::InvalidRequest { .. })
        ));
    }
}
