//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;

use super::request::{CalculatePayrollRequest, CreatePayrollRequest, PayrollListQuery};
use super::response::{ApiError, ApiErrorResponse, HealthResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/companies/:company_id/payrolls/calculate",
            post(calculate_handler),
        )
        .route(
            "/companies/:company_id/payrolls",
            post(create_payroll_handler).get(list_payrolls_handler),
        )
        .route(
            "/companies/:company_id/payrolls/:payroll_id",
            get(get_payroll_handler),
        )
        .route(
            "/companies/:company_id/payrolls/:payroll_id/approve",
            post(approve_handler),
        )
        .with_state(state)
}

/// Converts a JSON extraction failure into a 400 response.
fn reject_json(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response()
}

/// Logs an engine error and converts it into its HTTP response.
fn reject_engine(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    ApiErrorResponse::from(err).into_response()
}

fn respond<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// Handler for POST /companies/:company_id/payrolls/calculate.
///
/// Returns the full calculation result without persisting anything.
async fn calculate_handler(
    State(state): State<AppState>,
    Path(company_id): Path<u64>,
    payload: Result<Json<CalculatePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        company_id,
        "Processing calculation request"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject_json(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match state.service().calculate(&request, company_id).await {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = request.employee_id,
                gross_salary = %result.gross_salary,
                net_salary = %result.net_salary,
                warnings = result.audit_trace.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            respond(StatusCode::OK, result)
        }
        Err(err) => reject_engine(correlation_id, err),
    }
}

/// Handler for POST /companies/:company_id/payrolls.
async fn create_payroll_handler(
    State(state): State<AppState>,
    Path(company_id): Path<u64>,
    payload: Result<Json<CreatePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        company_id,
        "Processing payroll creation request"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject_json(correlation_id, rejection),
    };

    match state
        .service()
        .create_payroll_record(&request, company_id)
        .await
    {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                payroll_id = record.id,
                employee_id = record.employee_id,
                "Payroll record created"
            );
            respond(StatusCode::CREATED, record)
        }
        Err(err) => reject_engine(correlation_id, err),
    }
}

/// Handler for GET /companies/:company_id/payrolls.
async fn list_payrolls_handler(
    State(state): State<AppState>,
    Path(company_id): Path<u64>,
    Query(query): Query<PayrollListQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state
        .service()
        .list_payrolls(company_id, query.year, query.month)
        .await
    {
        Ok(records) => {
            info!(
                correlation_id = %correlation_id,
                company_id,
                count = records.len(),
                "Payrolls listed"
            );
            respond(StatusCode::OK, records)
        }
        Err(err) => reject_engine(correlation_id, err),
    }
}

/// Handler for GET /companies/:company_id/payrolls/:payroll_id.
async fn get_payroll_handler(
    State(state): State<AppState>,
    Path((company_id, payroll_id)): Path<(u64, u64)>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.service().get_payroll(payroll_id, company_id).await {
        Ok(record) => respond(StatusCode::OK, record),
        Err(err) => reject_engine(correlation_id, err),
    }
}

/// Handler for POST /companies/:company_id/payrolls/:payroll_id/approve.
async fn approve_handler(
    State(state): State<AppState>,
    Path((company_id, payroll_id)): Path<(u64, u64)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        company_id,
        payroll_id,
        "Processing approval request"
    );

    match state.service().approve(payroll_id, company_id).await {
        Ok(record) => respond(StatusCode::OK, record),
        Err(err) => reject_engine(correlation_id, err),
    }
}
