//! HTTP API module for the Payroll Engine.
//!
//! This module provides the REST endpoints for previewing, creating,
//! listing and approving payroll records. Every route is scoped by an
//! explicit `company_id` path parameter.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::PayrollListQuery;
pub use response::{ApiError, ApiErrorResponse, HealthResponse};
pub use state::AppState;
