//! Request types for the Payroll Engine API.
//!
//! JSON bodies deserialize straight into the service request types; only
//! the list query string is specific to HTTP.

use serde::{Deserialize, Serialize};

pub use crate::service::{CalculatePayrollRequest, CreatePayrollRequest};

/// Query string for `GET /companies/:company_id/payrolls`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollListQuery {
    /// Restrict to a period year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Restrict to a period month.
    #[serde(default)]
    pub month: Option<u32>,
}
