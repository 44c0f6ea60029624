//! Statutory contribution calculation.
//!
//! This module applies a company's contribution rules ("cotisations") to a
//! gross salary. The cap is applied to the contribution *amount*:
//! `min(gross × rate, max_amount)`, never `rate × min(gross, max_amount)`.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{
    AuditStep, AuditWarning, ContributionAmounts, ContributionKind, ContributionRule,
};

/// Warning code recorded when no active rule of a kind exists.
pub const MISSING_RULE_WARNING: &str = "MISSING_CONTRIBUTION_RULE";

/// Warning code recorded when several active rules share a kind.
pub const DUPLICATE_RULES_WARNING: &str = "DUPLICATE_CONTRIBUTION_RULES";

/// Applies an optional cap to an amount, reporting whether the cap bit.
fn apply_cap(amount: Decimal, cap: Option<Decimal>) -> (Decimal, bool) {
    match cap {
        Some(max) if amount > max => (max, true),
        _ => (amount, false),
    }
}

/// Computes the employee- and employer-side amounts of a single rule.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_contribution;
/// use payroll_engine::models::{ContributionKind, ContributionRule};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rule = ContributionRule {
///     id: 1,
///     company_id: 1,
///     name: "CNSS".to_string(),
///     kind: ContributionKind::SocialSecurity,
///     employee_rate: Decimal::from_str("0.0267").unwrap(),
///     employer_rate: Decimal::from_str("0.0533").unwrap(),
///     max_amount: Some(Decimal::from_str("649.8").unwrap()),
///     min_amount: None,
///     is_active: true,
/// };
///
/// let amounts = compute_contribution(Decimal::from(8000), &rule);
/// assert_eq!(amounts.employee, Decimal::from_str("213.6").unwrap());
/// assert_eq!(amounts.employer, Decimal::from_str("426.4").unwrap());
/// ```
pub fn compute_contribution(gross_salary: Decimal, rule: &ContributionRule) -> ContributionAmounts {
    let (employee, _) = apply_cap(gross_salary * rule.employee_rate, rule.max_amount);
    let (employer, _) = apply_cap(gross_salary * rule.employer_rate, rule.max_amount);
    ContributionAmounts { employee, employer }
}

/// The outcome of looking up the active rule of a kind.
#[derive(Debug, Clone, Copy)]
pub struct RuleLookup<'a> {
    /// The selected rule, if any active rule of the kind exists.
    pub rule: Option<&'a ContributionRule>,
    /// How many active rules of the kind were found.
    pub matches: usize,
}

/// Finds the active rule of the given kind.
///
/// When several active rules share a kind the one with the lowest identifier
/// wins.
pub fn find_active_rule(rules: &[ContributionRule], kind: ContributionKind) -> RuleLookup<'_> {
    let mut candidates = rules.iter().filter(|r| r.is_active && r.kind == kind);
    let mut selected = candidates.next();
    let mut matches = usize::from(selected.is_some());

    for rule in candidates {
        matches += 1;
        if selected.is_some_and(|s| rule.id < s.id) {
            selected = Some(rule);
        }
    }

    RuleLookup {
        rule: selected,
        matches,
    }
}

/// The result of calculating one contribution kind, including the audit step.
#[derive(Debug, Clone)]
pub struct ContributionResult {
    /// The kind that was calculated.
    pub kind: ContributionKind,
    /// The identifier of the rule applied, if any.
    pub rule_id: Option<u64>,
    /// The computed amounts (zero when no rule applies).
    pub amounts: ContributionAmounts,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Warnings raised while selecting the rule.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates the contribution of one kind against a gross salary.
///
/// A missing rule is not an error: both amounts are zero and a low-severity
/// warning is recorded.
///
/// # Arguments
///
/// * `gross_salary` - The gross salary the rates apply to
/// * `rules` - The company's active contribution rules
/// * `kind` - The contribution kind to calculate
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_contribution(
    gross_salary: Decimal,
    rules: &[ContributionRule],
    kind: ContributionKind,
    step_number: u32,
) -> ContributionResult {
    let lookup = find_active_rule(rules, kind);
    let mut warnings = Vec::new();

    let Some(rule) = lookup.rule else {
        debug!(kind = kind.as_str(), "No active contribution rule; contribution is zero");
        warnings.push(AuditWarning::new(
            MISSING_RULE_WARNING,
            format!("No active {} rule configured; contribution set to 0", kind.as_str()),
            "low",
        ));

        let audit_step = AuditStep {
            step_number,
            rule_id: kind.as_str().to_string(),
            rule_name: rule_name(kind).to_string(),
            input: serde_json::json!({
                "gross_salary": gross_salary.normalize().to_string(),
                "rule_found": false
            }),
            output: serde_json::json!({
                "employee_amount": "0",
                "employer_amount": "0"
            }),
            reasoning: format!(
                "No active {} rule for the company - contribution is $0",
                kind.as_str()
            ),
        };

        return ContributionResult {
            kind,
            rule_id: None,
            amounts: ContributionAmounts::default(),
            audit_step,
            warnings,
        };
    };

    if lookup.matches > 1 {
        warn!(
            kind = kind.as_str(),
            matches = lookup.matches,
            selected_rule_id = rule.id,
            "Multiple active contribution rules of the same kind"
        );
        warnings.push(AuditWarning::new(
            DUPLICATE_RULES_WARNING,
            format!(
                "{} active {} rules configured; applied rule {} (lowest id)",
                lookup.matches,
                kind.as_str(),
                rule.id
            ),
            "medium",
        ));
    }

    let employee_uncapped = gross_salary * rule.employee_rate;
    let employer_uncapped = gross_salary * rule.employer_rate;
    let (employee, employee_capped) = apply_cap(employee_uncapped, rule.max_amount);
    let (employer, employer_capped) = apply_cap(employer_uncapped, rule.max_amount);

    let reasoning = match rule.max_amount {
        Some(max) if employee_capped => format!(
            "${} × {} = ${} (capped at maximum ${})",
            gross_salary.normalize(),
            rule.employee_rate.normalize(),
            employee_uncapped.normalize(),
            max.normalize()
        ),
        _ => format!(
            "${} × {} = ${}",
            gross_salary.normalize(),
            rule.employee_rate.normalize(),
            employee.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: kind.as_str().to_string(),
        rule_name: rule_name(kind).to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "rule_found": true,
            "contribution_rule_id": rule.id,
            "contribution_rule_name": rule.name,
            "employee_rate": rule.employee_rate.normalize().to_string(),
            "employer_rate": rule.employer_rate.normalize().to_string(),
            "max_amount": rule.max_amount.map(|m| m.normalize().to_string())
        }),
        output: serde_json::json!({
            "employee_amount": employee.normalize().to_string(),
            "employer_amount": employer.normalize().to_string(),
            "employee_cap_applied": employee_capped,
            "employer_cap_applied": employer_capped
        }),
        reasoning,
    };

    ContributionResult {
        kind,
        rule_id: Some(rule.id),
        amounts: ContributionAmounts { employee, employer },
        audit_step,
        warnings,
    }
}

fn rule_name(kind: ContributionKind) -> &'static str {
    match kind {
        ContributionKind::SocialSecurity => "Social Security Contribution",
        ContributionKind::HealthInsurance => "Health Insurance Contribution",
        ContributionKind::IncomeTax => "Income Tax Contribution",
        ContributionKind::SupplementaryPension => "Supplementary Pension Contribution",
        ContributionKind::Other => "Other Contribution",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rule(id: u64, kind: ContributionKind, employee: &str, employer: &str, max: Option<&str>) -> ContributionRule {
        ContributionRule {
            id,
            company_id: 1,
            name: format!("rule {}", id),
            kind,
            employee_rate: dec(employee),
            employer_rate: dec(employer),
            max_amount: max.map(dec),
            min_amount: None,
            is_active: true,
        }
    }

    fn cnss() -> ContributionRule {
        rule(1, ContributionKind::SocialSecurity, "0.0267", "0.0533", Some("649.8"))
    }

    fn amo() -> ContributionRule {
        rule(2, ContributionKind::HealthInsurance, "0.0226", "0.0339", None)
    }

    #[test]
    fn test_below_cap() {
        let amounts = compute_contribution(dec("8000"), &cnss());
        assert_eq!(amounts.employee, dec("213.6"));
        assert_eq!(amounts.employer, dec("426.4"));
    }

    #[test]
    fn test_cap_applies_to_amount_not_base() {
        // 30000 × 0.0267 = 801 > 649.8; a base cap would give 649.8 × 0.0267
        let amounts = compute_contribution(dec("30000"), &cnss());
        assert_eq!(amounts.employee, dec("649.8"));
        assert_eq!(amounts.employer, dec("649.8"));
    }

    #[test]
    fn test_employer_capped_while_employee_is_not() {
        // 15000 × 0.0267 = 400.5, 15000 × 0.0533 = 799.5
        let amounts = compute_contribution(dec("15000"), &cnss());
        assert_eq!(amounts.employee, dec("400.5"));
        assert_eq!(amounts.employer, dec("649.8"));
    }

    #[test]
    fn test_exactly_at_cap() {
        let capped = rule(3, ContributionKind::Other, "0.1", "0", Some("100"));
        let amounts = compute_contribution(dec("1000"), &capped);
        assert_eq!(amounts.employee, dec("100"));
    }

    #[test]
    fn test_uncapped_rule() {
        let amounts = compute_contribution(dec("8000"), &amo());
        assert_eq!(amounts.employee, dec("180.8"));
        assert_eq!(amounts.employer, dec("271.2"));
    }

    #[test]
    fn test_find_active_rule_ignores_inactive() {
        let mut inactive = cnss();
        inactive.is_active = false;
        let rules = vec![inactive, amo()];

        let lookup = find_active_rule(&rules, ContributionKind::SocialSecurity);
        assert!(lookup.rule.is_none());
        assert_eq!(lookup.matches, 0);
    }

    #[test]
    fn test_find_active_rule_picks_lowest_id_among_duplicates() {
        let rules = vec![
            rule(9, ContributionKind::SocialSecurity, "0.05", "0", None),
            rule(4, ContributionKind::SocialSecurity, "0.0267", "0", None),
            rule(7, ContributionKind::SocialSecurity, "0.01", "0", None),
        ];

        let lookup = find_active_rule(&rules, ContributionKind::SocialSecurity);
        assert_eq!(lookup.rule.map(|r| r.id), Some(4));
        assert_eq!(lookup.matches, 3);
    }

    #[test]
    fn test_missing_rule_yields_zero_with_warning() {
        let result = calculate_contribution(dec("8000"), &[amo()], ContributionKind::SocialSecurity, 2);

        assert_eq!(result.amounts, ContributionAmounts::default());
        assert!(result.rule_id.is_none());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, MISSING_RULE_WARNING);
        assert!(!result.audit_step.input["rule_found"].as_bool().unwrap());
    }

    #[test]
    fn test_duplicate_rules_raise_warning() {
        let rules = vec![cnss(), rule(8, ContributionKind::SocialSecurity, "0.5", "0.5", None)];
        let result = calculate_contribution(dec("1000"), &rules, ContributionKind::SocialSecurity, 2);

        assert_eq!(result.rule_id, Some(1));
        assert_eq!(result.amounts.employee, dec("26.7"));
        assert_eq!(result.warnings[0].code, DUPLICATE_RULES_WARNING);
    }

    #[test]
    fn test_audit_step_records_cap() {
        let result = calculate_contribution(dec("30000"), &[cnss()], ContributionKind::SocialSecurity, 3);

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "social_security");
        assert!(result.audit_step.output["employee_cap_applied"].as_bool().unwrap());
        assert!(result.audit_step.reasoning.contains("capped"));
        assert!(result.warnings.is_empty());
    }
}
