//! Payroll service layer.
//!
//! [`PayrollService`] ties the pure calculation functions to the storage
//! ports: it validates requests, looks up employees and rules, persists
//! records through the ledger's atomic conditional insert, and performs the
//! `Draft -> Approved` transition.

mod payroll;
mod request;

pub use payroll::PayrollService;
pub use request::{CalculatePayrollRequest, CreatePayrollRequest, MAX_WORKED_DAYS};
