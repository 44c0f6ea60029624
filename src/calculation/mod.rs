//! Calculation logic for the Payroll Engine.
//!
//! This module contains the pure calculation functions: base salary
//! pro-ration, statutory contributions with capped amounts, the progressive
//! income tax table, and the composition of all of them into a full payroll
//! calculation. Nothing here performs I/O.

mod contribution;
mod income_tax;
mod payroll;
mod proration;

pub use contribution::{
    ContributionResult, DUPLICATE_RULES_WARNING, MISSING_RULE_WARNING, RuleLookup,
    calculate_contribution, compute_contribution, find_active_rule,
};
pub use income_tax::{
    IncomeTaxResult, TaxBracket, calculate_income_tax, compute_income_tax, income_tax_brackets,
};
pub use payroll::{
    HEALTH_INSURANCE_DEDUCTION, INACTIVE_EMPLOYEE_WARNING, INCOME_TAX_DEDUCTION,
    NEGATIVE_NET_SALARY_WARNING, OTHER_DEDUCTIONS, SOCIAL_SECURITY_DEDUCTION, calculate_payroll,
};
pub use proration::{
    CURRENCY_DECIMAL_PLACES, DAYS_PER_MONTH, ProrationResult, prorate_base_salary, round_currency,
};
