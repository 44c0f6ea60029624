//! Contribution rule ("cotisation") model.
//!
//! A contribution rule is a company-configured statutory deduction: an
//! employee-side rate, an employer-side rate and an optional cap.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::employee::MAX_MONETARY_AMOUNT;
use crate::error::{EngineError, EngineResult};

/// The closed set of contribution kinds a company can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionKind {
    /// Social security (CNSS).
    SocialSecurity,
    /// Mandatory health insurance (AMO).
    HealthInsurance,
    /// Income tax (IGR). The engine computes tax from a fixed bracket table,
    /// so rules of this kind are informational only.
    IncomeTax,
    /// Supplementary pension (CIMR).
    SupplementaryPension,
    /// Any other company-specific contribution.
    Other,
}

impl ContributionKind {
    /// Returns the snake_case identifier used in audit output.
    pub fn as_str(self) -> &'static str {
        match self {
            ContributionKind::SocialSecurity => "social_security",
            ContributionKind::HealthInsurance => "health_insurance",
            ContributionKind::IncomeTax => "income_tax",
            ContributionKind::SupplementaryPension => "supplementary_pension",
            ContributionKind::Other => "other",
        }
    }
}

fn default_active() -> bool {
    true
}

/// A contribution rule configured for a company.
///
/// Rates are fractions (`0.0267` is 2.67%). `max_amount` caps the computed
/// contribution *amount*, not the contribution base.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ContributionKind, ContributionRule};
/// use rust_decimal::Decimal;
///
/// let rule = ContributionRule {
///     id: 1,
///     company_id: 1,
///     name: "CNSS".to_string(),
///     kind: ContributionKind::SocialSecurity,
///     employee_rate: Decimal::new(267, 4),
///     employer_rate: Decimal::new(533, 4),
///     max_amount: Some(Decimal::new(6498, 1)),
///     min_amount: None,
///     is_active: true,
/// };
/// assert_eq!(rule.kind.as_str(), "social_security");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionRule {
    /// Unique identifier for the rule.
    pub id: u64,
    /// The company that configured the rule.
    pub company_id: u64,
    /// Human-readable name (e.g., "CNSS - Assurance Maladie").
    pub name: String,
    /// The kind of contribution.
    pub kind: ContributionKind,
    /// Employee-side rate as a fraction.
    pub employee_rate: Decimal,
    /// Employer-side rate as a fraction.
    pub employer_rate: Decimal,
    /// Maximum contribution amount, if capped.
    #[serde(default)]
    pub max_amount: Option<Decimal>,
    /// Minimum amount. Stored for completeness; the engine does not apply it.
    #[serde(default)]
    pub min_amount: Option<Decimal>,
    /// Whether the rule is active.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ContributionRule {
    /// Checks that both rates are fractions in `[0, 1]` and that the cap,
    /// if any, lies between zero and [`MAX_MONETARY_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        for (field, rate) in [
            ("employee_rate", self.employee_rate),
            ("employer_rate", self.employer_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::invalid_request(
                    field,
                    format!(
                        "rule {} ({}) must be between 0 and 1 (got {})",
                        self.id, self.name, rate
                    ),
                ));
            }
        }
        let out_of_range = |cap: &Decimal| *cap < Decimal::ZERO || *cap > MAX_MONETARY_AMOUNT;
        if let Some(cap) = self.max_amount.filter(out_of_range) {
            return Err(EngineError::invalid_request(
                "max_amount",
                format!(
                    "rule {} ({}) must be between 0 and {} (got {})",
                    self.id, self.name, MAX_MONETARY_AMOUNT, cap
                ),
            ));
        }
        Ok(())
    }
}
