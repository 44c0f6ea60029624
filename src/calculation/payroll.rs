//! Full payroll computation for one employee and one period.
//!
//! Composes pro-ration, allowances, statutory contributions, income tax and
//! other deductions into a [`PayrollCalculationResult`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    AuditStep, AuditTrace, AuditWarning, ContributionKind, ContributionRule, Deduction,
    DeductionCategory, Employee, PayrollBreakdown, PayrollCalculationResult,
};

use super::contribution::calculate_contribution;
use super::income_tax::calculate_income_tax;
use super::proration::prorate_base_salary;

/// Breakdown label for the employee social security deduction.
pub const SOCIAL_SECURITY_DEDUCTION: &str = "Social Security (Employee)";
/// Breakdown label for the employee health insurance deduction.
pub const HEALTH_INSURANCE_DEDUCTION: &str = "Health Insurance (Employee)";
/// Breakdown label for income tax.
pub const INCOME_TAX_DEDUCTION: &str = "Income Tax";
/// Breakdown label for caller-supplied deductions.
pub const OTHER_DEDUCTIONS: &str = "Other Deductions";

/// Warning code recorded when the employee is flagged inactive.
pub const INACTIVE_EMPLOYEE_WARNING: &str = "INACTIVE_EMPLOYEE";
/// Warning code recorded when deductions exceed gross salary.
pub const NEGATIVE_NET_SALARY_WARNING: &str = "NEGATIVE_NET_SALARY";

/// Calculates payroll for an employee.
///
/// # Arguments
///
/// * `employee` - The employee; `base_salary` must pass [`Employee::validate`]
/// * `worked_days` - Days worked in the period, at most 31
/// * `allowances` - Allowances added to the pro-rated base, in `[0, MAX_MONETARY_AMOUNT]`
/// * `other_deductions` - Additional deductions, in `[0, MAX_MONETARY_AMOUNT]`
/// * `active_rules` - The company's active contribution rules, each passing
///   [`ContributionRule::validate`]
///
/// The computation is total over that domain and cannot fail; amounts past
/// [`MAX_MONETARY_AMOUNT`](crate::models::MAX_MONETARY_AMOUNT) may overflow
/// `Decimal`. Net salary is not floored at zero; a negative net is reported
/// with a warning.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_payroll;
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: 3,
///     company_id: 1,
///     employee_number: "EMP003".to_string(),
///     base_salary: Decimal::from(6000),
///     is_active: true,
/// };
///
/// let result = calculate_payroll(&employee, 15, Decimal::ZERO, Decimal::ZERO, &[]);
/// assert_eq!(result.gross_salary, Decimal::from(3000));
/// assert_eq!(result.income_tax, Decimal::from(50));
/// assert_eq!(result.net_salary, Decimal::from(2950));
/// ```
pub fn calculate_payroll(
    employee: &Employee,
    worked_days: u32,
    allowances: Decimal,
    other_deductions: Decimal,
    active_rules: &[ContributionRule],
) -> PayrollCalculationResult {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    if !employee.is_active {
        warnings.push(AuditWarning::new(
            INACTIVE_EMPLOYEE_WARNING,
            format!("Employee {} is marked inactive", employee.id),
            "medium",
        ));
    }

    let proration = prorate_base_salary(employee.base_salary, worked_days, step_number);
    steps.push(proration.audit_step);
    step_number += 1;

    let base_salary = proration.prorated_base;
    let gross_salary = base_salary + allowances;

    let social_security = calculate_contribution(
        gross_salary,
        active_rules,
        ContributionKind::SocialSecurity,
        step_number,
    );
    steps.push(social_security.audit_step);
    warnings.extend(social_security.warnings);
    step_number += 1;

    let health_insurance = calculate_contribution(
        gross_salary,
        active_rules,
        ContributionKind::HealthInsurance,
        step_number,
    );
    steps.push(health_insurance.audit_step);
    warnings.extend(health_insurance.warnings);
    step_number += 1;

    let income_tax = calculate_income_tax(gross_salary, step_number);
    steps.push(income_tax.audit_step);
    step_number += 1;

    let deductions = vec![
        Deduction {
            name: SOCIAL_SECURITY_DEDUCTION.to_string(),
            amount: social_security.amounts.employee,
            category: DeductionCategory::Social,
        },
        Deduction {
            name: HEALTH_INSURANCE_DEDUCTION.to_string(),
            amount: health_insurance.amounts.employee,
            category: DeductionCategory::Social,
        },
        Deduction {
            name: INCOME_TAX_DEDUCTION.to_string(),
            amount: income_tax.tax,
            category: DeductionCategory::Tax,
        },
        Deduction {
            name: OTHER_DEDUCTIONS.to_string(),
            amount: other_deductions,
            category: DeductionCategory::Other,
        },
    ];

    let total_deductions: Decimal = deductions.iter().map(|d| d.amount).sum();
    let net_salary = gross_salary - total_deductions;

    if net_salary < Decimal::ZERO {
        warnings.push(AuditWarning::new(
            NEGATIVE_NET_SALARY_WARNING,
            format!(
                "Deductions ${} exceed gross salary ${}",
                total_deductions.normalize(),
                gross_salary.normalize()
            ),
            "high",
        ));
    }

    steps.push(AuditStep {
        step_number,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "allowances": allowances.normalize().to_string(),
            "deductions": deductions
                .iter()
                .map(|d| serde_json::json!({ "name": d.name, "amount": d.amount.normalize().to_string() }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string(),
            "net_salary": net_salary.normalize().to_string()
        }),
        reasoning: format!(
            "${} gross − ${} deductions = ${} net",
            gross_salary.normalize(),
            total_deductions.normalize(),
            net_salary.normalize()
        ),
    });

    debug!(
        employee_id = employee.id,
        gross_salary = %gross_salary,
        total_deductions = %total_deductions,
        net_salary = %net_salary,
        "Payroll calculated"
    );

    PayrollCalculationResult {
        employee_id: employee.id,
        worked_days,
        gross_salary,
        net_salary,
        total_deductions,
        social_security: social_security.amounts,
        health_insurance: health_insurance.amounts,
        income_tax: income_tax.tax,
        breakdown: PayrollBreakdown {
            base_salary,
            allowances,
            gross_salary,
            deductions,
            total_deductions,
            net_salary,
        },
        audit_trace: AuditTrace { steps, warnings },
    }
}
