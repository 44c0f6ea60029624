//! Progressive income tax calculation.
//!
//! Tax is computed from a fixed, piecewise-linear bracket table. Each
//! bracket's base amount is the tax owed at the previous bracket's upper
//! bound, so the function is continuous (within a cent) across boundaries.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// One bracket of the progressive table.
///
/// Tax for a gross salary inside the bracket is
/// `base_tax + (gross - lower_bound) × rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    /// Inclusive upper bound; `None` for the open top bracket.
    pub upper_bound: Option<Decimal>,
    /// The amount the marginal rate applies above.
    pub lower_bound: Decimal,
    /// Tax owed at `lower_bound`.
    pub base_tax: Decimal,
    /// Marginal rate as a fraction.
    pub rate: Decimal,
}

impl TaxBracket {
    fn contains(&self, gross_salary: Decimal) -> bool {
        self.upper_bound.is_none_or(|upper| gross_salary <= upper)
    }

    fn tax_for(&self, gross_salary: Decimal) -> Decimal {
        if self.rate.is_zero() {
            return self.base_tax;
        }
        self.base_tax + (gross_salary - self.lower_bound) * self.rate
    }
}

/// Returns the bracket table in ascending order.
///
/// | Upper bound | Formula |
/// |---|---|
/// | 2500 | 0 |
/// | 4166.67 | (gross − 2500) × 0.10 |
/// | 5000 | 166.67 + (gross − 4166.67) × 0.20 |
/// | 6666.67 | 333.33 + (gross − 5000) × 0.30 |
/// | 15000 | 833.33 + (gross − 6666.67) × 0.34 |
/// | none | 3666.67 + (gross − 15000) × 0.38 |
pub fn income_tax_brackets() -> [TaxBracket; 6] {
    [
        TaxBracket {
            upper_bound: Some(Decimal::new(2500, 0)),
            lower_bound: Decimal::ZERO,
            base_tax: Decimal::ZERO,
            rate: Decimal::ZERO,
        },
        TaxBracket {
            upper_bound: Some(Decimal::new(416667, 2)),
            lower_bound: Decimal::new(2500, 0),
            base_tax: Decimal::ZERO,
            rate: Decimal::new(10, 2),
        },
        TaxBracket {
            upper_bound: Some(Decimal::new(5000, 0)),
            lower_bound: Decimal::new(416667, 2),
            base_tax: Decimal::new(16667, 2),
            rate: Decimal::new(20, 2),
        },
        TaxBracket {
            upper_bound: Some(Decimal::new(666667, 2)),
            lower_bound: Decimal::new(5000, 0),
            base_tax: Decimal::new(33333, 2),
            rate: Decimal::new(30, 2),
        },
        TaxBracket {
            upper_bound: Some(Decimal::new(15000, 0)),
            lower_bound: Decimal::new(666667, 2),
            base_tax: Decimal::new(83333, 2),
            rate: Decimal::new(34, 2),
        },
        TaxBracket {
            upper_bound: None,
            lower_bound: Decimal::new(15000, 0),
            base_tax: Decimal::new(366667, 2),
            rate: Decimal::new(38, 2),
        },
    ]
}

/// Finds the first bracket containing the gross salary.
fn select_bracket(gross_salary: Decimal) -> (usize, TaxBracket) {
    let brackets = income_tax_brackets();
    let index = brackets
        .iter()
        .position(|b| b.contains(gross_salary))
        .unwrap_or(brackets.len() - 1);
    (index, brackets[index])
}

/// Computes income tax for a gross salary.
///
/// Never negative: salaries at or below 2500 (including negative inputs)
/// owe nothing.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_income_tax;
/// use rust_decimal::Decimal;
///
/// assert_eq!(compute_income_tax(Decimal::from(3000)), Decimal::from(50));
/// assert_eq!(compute_income_tax(Decimal::from(2500)), Decimal::ZERO);
/// ```
pub fn compute_income_tax(gross_salary: Decimal) -> Decimal {
    let (_, bracket) = select_bracket(gross_salary);
    bracket.tax_for(gross_salary)
}

/// The result of an income tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// The tax owed.
    pub tax: Decimal,
    /// Zero-based index of the bracket applied.
    pub bracket_index: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates income tax and records the bracket decision.
pub fn calculate_income_tax(gross_salary: Decimal, step_number: u32) -> IncomeTaxResult {
    let (bracket_index, bracket) = select_bracket(gross_salary);
    let tax = bracket.tax_for(gross_salary);

    let reasoning = if bracket.rate.is_zero() {
        format!(
            "Gross salary ${} is within the exempt bracket - no income tax",
            gross_salary.normalize()
        )
    } else {
        format!(
            "${} + (${} − ${}) × {} = ${}",
            bracket.base_tax.normalize(),
            gross_salary.normalize(),
            bracket.lower_bound.normalize(),
            bracket.rate.normalize(),
            tax.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Progressive Income Tax".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "bracket": bracket_index + 1,
            "upper_bound": bracket.upper_bound.map(|u| u.normalize().to_string()),
            "rate": bracket.rate.normalize().to_string(),
            "tax": tax.normalize().to_string()
        }),
        reasoning,
    };

    IncomeTaxResult {
        tax,
        bracket_index,
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

    fn assert_close(actual: Decimal, expected: &str) {
        let diff = (actual - dec(expected)).abs();
        assert!(
            diff <= dec("0.01"),
            "Expected ~{}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_exempt_bracket() {
        assert_eq!(compute_income_tax(dec("0")), Decimal::ZERO);
        assert_eq!(compute_income_tax(dec("2500")), Decimal::ZERO);
    }

    #[test]
    fn test_negative_gross_owes_nothing() {
        assert_eq!(compute_income_tax(dec("-500")), Decimal::ZERO);
    }

    #[test]
    fn test_second_bracket() {
        assert_eq!(compute_income_tax(dec("3000")), dec("50"));
        assert_eq!(compute_income_tax(dec("2500.01")), dec("0.001"));
    }

    #[test]
    fn test_bracket_boundaries_are_continuous() {
        assert_close(compute_income_tax(dec("4166.67")), "166.67");
        assert_close(compute_income_tax(dec("5000")), "333.33");
        assert_close(compute_income_tax(dec("6666.67")), "833.33");
        assert_close(compute_income_tax(dec("15000")), "3666.67");
    }

    #[test]
    fn test_upper_bounds_are_inclusive() {
        // 4166.67 is taxed by the second bracket: (4166.67 - 2500) × 0.10
        assert_eq!(compute_income_tax(dec("4166.67")), dec("166.667"));
        // 5000 is taxed by the third bracket: 166.67 + 833.33 × 0.20
        assert_eq!(compute_income_tax(dec("5000")), dec("333.336"));
    }

    #[test]
    fn test_fifth_bracket_exact() {
        // 833.33 + (8000 - 6666.67) × 0.34
        assert_eq!(compute_income_tax(dec("8000")), dec("1286.6622"));
    }

    #[test]
    fn test_top_bracket() {
        // 3666.67 + 5000 × 0.38
        assert_eq!(compute_income_tax(dec("20000")), dec("5566.67"));
    }

    #[test]
    fn test_brackets_are_contiguous_and_ascending() {
        let brackets = income_tax_brackets();
        for pair in brackets.windows(2) {
            let upper = pair[0].upper_bound.unwrap();
            assert_eq!(pair[1].lower_bound, upper);
            assert!(pair[1].upper_bound.is_none_or(|next| next > upper));
        }
        assert!(brackets.last().unwrap().upper_bound.is_none());
    }

    #[test]
    fn test_audit_step_records_bracket() {
        let result = calculate_income_tax(dec("8000"), 4);
        assert_eq!(result.bracket_index, 4);
        assert_eq!(result.tax, dec("1286.6622"));
        assert_eq!(result.audit_step.output["bracket"], 5);
        assert_eq!(result.audit_step.output["rate"], "0.34");
    }

    #[test]
    fn test_audit_step_for_exempt_salary() {
        let result = calculate_income_tax(dec("2000"), 1);
        assert_eq!(result.bracket_index, 0);
        assert!(result.audit_step.reasoning.contains("exempt"));
    }
}
