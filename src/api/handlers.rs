//! HTTP request handlers for the leave simulation API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::analyze;
use crate::config::SimulationConfig;
use crate::engine::generate_with_existing;
use crate::error::EngineResult;
use crate::models::{Assignment, CoverageReport, Headcount, Roster};

use super::request::{AnalysisRequest, SimulationRequest, into_roster};
use super::response::{ApiError, ApiErrorResponse, SimulationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/simulate", post(simulate_handler))
        .route("/analyze", post(analyze_handler))
        .with_state(state)
}

/// Handler for POST /simulate.
///
/// Generates assignments for the posted roster with the loaded configuration
/// and returns them together with their coverage.
async fn simulate_handler(
    State(state): State<AppState>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing simulation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let seed = request.seed;
    let start_time = Instant::now();
    let result = into_roster(request.roster).and_then(|roster| {
        let config = state.simulation_config(seed);
        run_simulation(&roster, &config, &request.existing)
    });

    match result {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                seed = response.seed,
                assignments = response.assignments.len(),
                warnings = response.warnings.len(),
                overall_percent = response.coverage.overall.actual_percent,
                duration_us = start_time.elapsed().as_micros(),
                "Simulation completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Simulation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /analyze.
///
/// Measures the coverage of posted assignments against the posted roster.
async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing analysis request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config().config();
    let result: EngineResult<CoverageReport> = into_roster(request.roster).and_then(|roster| {
        analyze(
            &request.assignments,
            config,
            &config.horizon,
            &Headcount::from_roster(&roster),
        )
    });

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                assignments = request.assignments.len(),
                overall_percent = report.overall.actual_percent,
                "Analysis completed successfully"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Analysis failed"
            );
            error_response(err.into())
        }
    }
}

/// Generates assignments and measures their coverage.
fn run_simulation(
    roster: &Roster,
    config: &SimulationConfig,
    existing: &[Assignment],
) -> EngineResult<SimulationResponse> {
    let generated = generate_with_existing(roster, config, existing)?;
    let coverage = analyze(
        &generated.assignments,
        config,
        &config.horizon,
        &roster.headcount(),
    )?;

    Ok(SimulationResponse {
        simulation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        seed: config.random_seed,
        assignments: generated.assignments,
        warnings: generated.warnings,
        allocations: generated.allocations,
        coverage,
        audit_trace: generated.audit_trace,
    })
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
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
    json_response(StatusCode::BAD_REQUEST, error)
}
