//! Storage collaborators for the Payroll Engine.
//!
//! The engine reads employees and contribution rules through
//! [`EmployeeDirectory`] and writes payroll records through [`PayrollLedger`].
//! Period-key uniqueness is enforced by the ledger itself via
//! [`PayrollLedger::insert_if_absent`]; the service never does a separate
//! check-then-insert.

mod in_memory;
mod ports;

pub use in_memory::InMemoryStore;
pub use ports::{
    EmployeeDirectory, InsertOutcome, PayrollLedger, PayrollStore, StatusTransition,
};
