//! Base salary pro-ration.
//!
//! Monthly salaries are pro-rated on a fixed 30-day month regardless of the
//! number of calendar days in the period.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::AuditStep;

/// The fixed month length used for pro-ration.
pub const DAYS_PER_MONTH: u32 = 30;

/// Number of decimal places monetary amounts are rounded to.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to cents, midpoint away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("0.125").unwrap()), Decimal::from_str("0.13").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("-0.125").unwrap()), Decimal::from_str("-0.13").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// The result of pro-rating a base salary, including the audit step.
#[derive(Debug, Clone)]
pub struct ProrationResult {
    /// Base salary divided by [`DAYS_PER_MONTH`], unrounded.
    pub daily_salary: Decimal,
    /// `base * worked_days / 30`, unrounded.
    pub prorated_base: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Pro-rates a monthly base salary for the number of days worked.
///
/// `daily = base / 30` and `prorated = daily * worked_days`, evaluated as
/// `base * worked_days / 30` so a full month returns the base exactly.
/// Nothing is rounded here; stored records round to cents with
/// [`round_currency`].
/// Worked days above 30 are not clamped; a 31-day entry pays 31/30 of the base.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::prorate_base_salary;
/// use rust_decimal::Decimal;
///
/// let result = prorate_base_salary(Decimal::from(6000), 15, 1);
/// assert_eq!(result.prorated_base, Decimal::from(3000));
/// ```
pub fn prorate_base_salary(base_salary: Decimal, worked_days: u32, step_number: u32) -> ProrationResult {
    let days_per_month = Decimal::from(DAYS_PER_MONTH);
    let daily_salary = base_salary / days_per_month;
    let prorated_base = base_salary * Decimal::from(worked_days) / days_per_month;

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_salary_proration".to_string(),
        rule_name: "Base Salary Pro-ration".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "worked_days": worked_days,
            "days_per_month": DAYS_PER_MONTH
        }),
        output: serde_json::json!({
            "daily_salary": daily_salary.normalize().to_string(),
            "prorated_base": prorated_base.normalize().to_string()
        }),
        reasoning: format!(
            "${} / {} days × {} worked days = ${}",
            base_salary.normalize(),
            DAYS_PER_MONTH,
            worked_days,
            prorated_base.normalize()
        ),
    };

    ProrationResult {
        daily_salary,
        prorated_base,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_full_month_returns_base_salary() {
        let result = prorate_base_salary(dec("8000"), 30, 1);
        assert_eq!(result.prorated_base, dec("8000"));
    }

    #[test]
    fn test_half_month() {
        let result = prorate_base_salary(dec("6000"), 15, 1);
        assert_eq!(result.daily_salary, dec("200"));
        assert_eq!(result.prorated_base, dec("3000"));
    }

    #[test]
    fn test_repeating_daily_rate_is_not_rounded() {
        // 1000 / 30 = 33.333..., × 7 = 233.333...
        let result = prorate_base_salary(dec("1000"), 7, 1);
        assert_eq!(result.prorated_base, dec("233.33333333333333333333333333"));
        assert_eq!(round_currency(result.prorated_base), dec("233.33"));
    }

    #[test]
    fn test_half_cent_is_kept() {
        // 0.15 / 30 = 0.005
        let result = prorate_base_salary(dec("0.15"), 1, 1);
        assert_eq!(result.prorated_base, dec("0.005"));
        assert_eq!(round_currency(result.prorated_base), dec("0.01"));
    }

    #[test]
    fn test_repeating_third_at_half_cent() {
        // 0.01 × 15 / 30 = 0.005 exactly, although 0.01 / 30 repeats
        let result = prorate_base_salary(dec("0.01"), 15, 1);
        assert_eq!(result.prorated_base, dec("0.005"));
    }

    #[test]
    fn test_zero_worked_days() {
        let result = prorate_base_salary(dec("8000"), 0, 1);
        assert_eq!(result.prorated_base, Decimal::ZERO);
    }

    #[test]
    fn test_thirty_one_days_is_not_clamped() {
        let result = prorate_base_salary(dec("3000"), 31, 1);
        assert_eq!(result.prorated_base, dec("3100"));
    }

    #[test]
    fn test_audit_step() {
        let result = prorate_base_salary(dec("6000"), 15, 4);
        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "base_salary_proration");
        assert_eq!(result.audit_step.output["prorated_base"], "3000");
        assert!(result.audit_step.reasoning.contains("15 worked days"));
    }
}
